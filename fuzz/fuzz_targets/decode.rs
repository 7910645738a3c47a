#![no_main]
use libfuzzer_sys::fuzz_target;
use dlzw::{Decoder, Limits, HEADER};

fuzz_target!(|raw_data: &[u8]| {
    let mut data = format!("{}\n4 16 2\n", HEADER).into_bytes();
    data.extend_from_slice(raw_data);
    let _ = Decoder::with_limits(Limits { max_samples: 1 << 16 }).decode(&data);
});
