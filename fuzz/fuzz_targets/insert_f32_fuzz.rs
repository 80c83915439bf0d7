#![no_main]
mod fuzz_shared;
use fuzz_shared::{insert_and_check, FuzzPoint};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<FuzzPoint<f32>>| {
    if data.iter().any(|p| !p.is_usable()) {
        return;
    }
    insert_and_check(&data);
});
