#![no_main]
use libfuzzer_sys::fuzz_target;
use dlzw::{decode, encode, Image};

fuzz_target!(|data: &[u8]| {
    let (&shape, samples) = match data.split_first() {
        Some(split) => split,
        None => return,
    };
    // Low bits pick the channel count, the rest of the samples form the rows.
    let channels = usize::from(shape % 4) + 1;
    let columns = usize::from(shape >> 2) + 1;
    let rows = samples.len() / (columns * channels);
    let samples = samples[..rows * columns * channels].to_vec();

    let image = Image::new(rows, columns, channels, samples).unwrap();
    match decode(&encode(&image)) {
        Ok(decoded) => assert!(decoded == image),
        Err(err) => panic!("{}", err),
    }
});
