use dlzw::{decode, encode, Decoder, Error, Image, Limits, HEADER};

fn container(dimensions: &str, payload: &[u8]) -> Vec<u8> {
    let mut data = format!("{}\n{}\n", HEADER, dimensions).into_bytes();
    data.extend_from_slice(payload);
    data
}

#[test]
fn header_must_match_exactly() {
    let valid = encode(&Image::grayscale(1, 1, vec![3]).unwrap());
    for data in [
        &b""[..],
        b"my compressed image - v1.0",
        b"my compressed image - v1.1\n1 1 1\n\x00\x03\xff\xff",
        b"My compressed image - v1.0\n1 1 1\n\x00\x03\xff\xff",
        b"my compressed image - v1.0 \n1 1 1\n\x00\x03\xff\xff",
        &valid[1..],
    ]
    .iter()
    {
        assert!(matches!(decode(data), Err(Error::UnrecognizedFormat)));
    }
}

#[test]
fn dimension_line() {
    for dimensions in ["1 1", "1 1 1 1", "a b c", "1 1 0", "-1 1 1"].iter() {
        let data = container(dimensions, &[255, 255]);
        assert!(matches!(decode(&data), Err(Error::InvalidDimensions { .. })));
    }

    let data = format!("{}\n1 1 1", HEADER).into_bytes();
    assert!(matches!(decode(&data), Err(Error::InvalidDimensions { .. })));
}

#[test]
fn truncated_payload() {
    let image = Image::new(4, 4, 3, (0..48).map(|i| (i * i) as u8).collect()).unwrap();
    let encoded = encode(&image);
    let head = format!("{}\n4 4 3\n", HEADER).len();

    for cut in head..encoded.len() {
        match decode(&encoded[..cut]) {
            Err(Error::TruncatedStream { .. }) => {}
            other => panic!("cut at {}: {:?}", cut, other),
        }
    }
}

#[test]
fn truncation_names_the_channel() {
    // Channel 0 is complete, channel 1 lacks its end marker.
    let data = container("1 2 2", &[0, 1, 0, 1, 255, 255, 0, 1, 0, 1]);
    assert!(matches!(decode(&data), Err(Error::TruncatedStream { channel: 1 })));
}

#[test]
fn missing_last_sample() {
    // The ramp without its trailing single delta only describes three samples.
    let data = container("1 4 1", &[0, 10, 2, 0, 255, 255]);
    assert!(matches!(decode(&data), Err(Error::TruncatedStream { channel: 0 })));
}

#[test]
fn more_samples_than_declared() {
    let data = container("1 3 1", &[0, 10, 2, 0, 0, 10, 255, 255]);
    assert!(matches!(decode(&data), Err(Error::FramingOverrun { channel: 0 })));

    let data = container("1 1 1", &[0, 10, 0, 10, 255, 255]);
    assert!(matches!(decode(&data), Err(Error::FramingOverrun { channel: 0 })));
}

#[test]
fn corrupt_codes() {
    let data = container("1 1 1", &[0, 0, 255, 255]);
    assert!(matches!(decode(&data), Err(Error::InvalidCode { channel: 0, code: 0 })));

    let data = container("1 1 1", &[1, 1, 255, 255]);
    assert!(matches!(decode(&data), Err(Error::SampleOutOfRange { channel: 0 })));
}

#[test]
fn trailing_bytes_are_ignored() {
    let image = Image::grayscale(2, 2, vec![1, 2, 3, 4]).unwrap();
    let mut data = encode(&image);
    data.extend_from_slice(b"trailer");
    assert_eq!(decode(&data).unwrap(), image);
}

#[test]
fn limits() {
    let image = Image::new(10, 10, 3, vec![42; 300]).unwrap();
    let data = encode(&image);

    let tight = Decoder::with_limits(Limits { max_samples: 299 });
    assert!(matches!(
        tight.decode(&data),
        Err(Error::LimitExceeded {
            samples: 300,
            limit: 299
        })
    ));

    let exact = Decoder::with_limits(Limits { max_samples: 300 });
    assert_eq!(exact.decode(&data).unwrap(), image);
    assert_eq!(Decoder::with_limits(Limits::none()).decode(&data).unwrap(), image);
}

#[test]
fn io_errors_are_forwarded() {
    struct Failing;

    impl std::io::Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "broken"))
        }
    }

    assert!(matches!(Decoder::new().from_stream(Failing).decode(), Err(Error::Io(_))));
}

#[test]
fn error_messages() {
    assert_eq!(
        Error::UnrecognizedFormat.to_string(),
        "input is not in the 'my compressed image - v1.0' format"
    );
    assert_eq!(
        Error::TruncatedStream { channel: 2 }.to_string(),
        "channel 2: stream ended before all samples were decoded"
    );
}
