#![no_main]
use libfuzzer_sys::fuzz_target;
use pecoff_catalog::options::ParseOptions;
use pecoff_catalog::pe::{characteristic, header, optional_header};

fuzz_target!(|data: &[u8]| {
    let mut offset = 0;
    if let Ok(coff) = header::parse_coff_header(data, &mut offset, scroll::LE) {
        assert!(!header::machine_to_str(coff.machine.get()).is_empty());
        assert!(!characteristic::characteristic_to_str(coff.characteristics.get()).is_empty());
        let _ = header::string_table_offset(&coff);
    }
    let opts = ParseOptions::permissive();
    if let Ok(opt) = optional_header::parse_optional_header(data, &mut offset, scroll::LE, &opts) {
        assert!(!optional_header::magic_to_str(opt.magic.get()).is_empty());
        let _ = optional_header::base_of_data(&opt);
    }
});
