use pecoff_catalog::error;
use pecoff_catalog::options::ParseOptions;
use pecoff_catalog::pe::characteristic::{self, characteristic_to_str, characteristics_to_strs};
use pecoff_catalog::pe::header::{self, COFF_MACHINE_X86, PE_MAGIC, SIZEOF_COFF_HEADER, SIZEOF_PE_MAGIC};
use pecoff_catalog::pe::optional_header::{self, MAGIC_32, SIZEOF_STANDARD_FIELDS_32};
use scroll::Pread;

// DOS stub, PE signature, COFF header, optional header and section table of crss.exe
const CRSS_HEADER: [u8; 688] = [
    0x4d, 0x5a, 0x90, 0x00, 0x03, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0xff, 0xff, 0x00,
    0x00, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xd0, 0x00, 0x00, 0x00, 0x0e, 0x1f, 0xba, 0x0e, 0x00, 0xb4, 0x09, 0xcd, 0x21, 0xb8, 0x01,
    0x4c, 0xcd, 0x21, 0x54, 0x68, 0x69, 0x73, 0x20, 0x70, 0x72, 0x6f, 0x67, 0x72, 0x61, 0x6d,
    0x20, 0x63, 0x61, 0x6e, 0x6e, 0x6f, 0x74, 0x20, 0x62, 0x65, 0x20, 0x72, 0x75, 0x6e, 0x20,
    0x69, 0x6e, 0x20, 0x44, 0x4f, 0x53, 0x20, 0x6d, 0x6f, 0x64, 0x65, 0x2e, 0x0d, 0x0d, 0x0a,
    0x24, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xaa, 0x4a, 0xc3, 0xeb, 0xee, 0x2b, 0xad,
    0xb8, 0xee, 0x2b, 0xad, 0xb8, 0xee, 0x2b, 0xad, 0xb8, 0xee, 0x2b, 0xac, 0xb8, 0xfe, 0x2b,
    0xad, 0xb8, 0x33, 0xd4, 0x66, 0xb8, 0xeb, 0x2b, 0xad, 0xb8, 0x33, 0xd4, 0x63, 0xb8, 0xea,
    0x2b, 0xad, 0xb8, 0x33, 0xd4, 0x7a, 0xb8, 0xed, 0x2b, 0xad, 0xb8, 0x33, 0xd4, 0x64, 0xb8,
    0xef, 0x2b, 0xad, 0xb8, 0x33, 0xd4, 0x61, 0xb8, 0xef, 0x2b, 0xad, 0xb8, 0x52, 0x69, 0x63,
    0x68, 0xee, 0x2b, 0xad, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x50, 0x45,
    0x00, 0x00, 0x4c, 0x01, 0x05, 0x00, 0xd9, 0x8f, 0x15, 0x52, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0xe0, 0x00, 0x02, 0x01, 0x0b, 0x01, 0x0b, 0x00, 0x00, 0x08, 0x00, 0x00,
    0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x11, 0x00, 0x00, 0x00, 0x10, 0x00,
    0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x02,
    0x00, 0x00, 0x06, 0x00, 0x03, 0x00, 0x06, 0x00, 0x03, 0x00, 0x06, 0x00, 0x03, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x60, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0xe4, 0xab, 0x00, 0x00,
    0x01, 0x00, 0x40, 0x05, 0x00, 0x00, 0x04, 0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x00, 0x10,
    0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3c, 0x30, 0x00, 0x00, 0x3c, 0x00, 0x00, 0x00, 0x00,
    0x40, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x1a, 0x00, 0x00, 0xb8, 0x22, 0x00, 0x00, 0x00, 0x50, 0x00, 0x00, 0x38, 0x00, 0x00,
    0x00, 0x10, 0x10, 0x00, 0x00, 0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x68, 0x10, 0x00, 0x00, 0x5c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x30, 0x00, 0x00, 0x3c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2e, 0x74, 0x65, 0x78, 0x74, 0x00, 0x00, 0x00, 0x24,
    0x06, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00,
    0x60, 0x2e, 0x64, 0x61, 0x74, 0x61, 0x00, 0x00, 0x00, 0x3c, 0x03, 0x00, 0x00, 0x00, 0x20,
    0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0xc0, 0x2e, 0x69, 0x64, 0x61,
    0x74, 0x61, 0x00, 0x00, 0xf8, 0x01, 0x00, 0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x02, 0x00,
    0x00, 0x00, 0x0e, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x40, 0x00, 0x00, 0x40, 0x2e, 0x72, 0x73, 0x72, 0x63, 0x00, 0x00, 0x00, 0x00,
    0x08, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00,
    0x42, 0x2e, 0x72, 0x65, 0x6c, 0x6f, 0x63, 0x00, 0x00, 0x86, 0x01, 0x00, 0x00, 0x00, 0x50,
    0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x42, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

// e_lfanew
const PE_POINTER_OFFSET: usize = 0x3c;

fn init_logging() {
    // only the first test to get here installs the logger
    let _ = stderrlog::new()
        .module("pecoff_catalog")
        .verbosity(4usize)
        .init();
}

#[test]
fn crss_headers() {
    init_logging();
    let bytes = &CRSS_HEADER[..];
    let pe_pointer = bytes.pread_with::<u32>(PE_POINTER_OFFSET, scroll::LE).unwrap() as usize;
    assert_eq!(pe_pointer, 0xd0);
    assert_eq!(bytes.pread_with::<u32>(pe_pointer, scroll::LE).unwrap(), PE_MAGIC);

    let mut offset = pe_pointer + SIZEOF_PE_MAGIC;
    let coff = header::parse_coff_header(bytes, &mut offset, scroll::LE).unwrap();
    assert_eq!(coff.machine.get(), COFF_MACHINE_X86);
    assert!(header::is_machine_known(coff.machine.get()));
    assert_eq!(header::machine_to_str(coff.machine.get()), "x86 (COFF)");
    assert_eq!(coff.number_of_sections.get(), 5);
    assert_eq!(header::string_table_offset(&coff), None);

    let characteristics = coff.characteristics.get();
    assert!(characteristic::is_executable_image(characteristics));
    assert!(!characteristic::is_dll(characteristics));
    assert_eq!(
        characteristic_to_str(characteristics),
        "PE image is a valid executable (COFF)"
    );
    assert_eq!(
        characteristics_to_strs(characteristics).collect::<Vec<_>>(),
        ["PE image is a valid executable (COFF)", "32-bit image (COFF)"]
    );

    let optional_start = offset;
    let opt = optional_header::parse_optional_header(
        bytes,
        &mut offset,
        scroll::LE,
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(offset - optional_start, SIZEOF_STANDARD_FIELDS_32);
    assert!(coff.size_of_optional_header.get() as usize >= SIZEOF_STANDARD_FIELDS_32);
    assert_eq!(opt.magic.get(), MAGIC_32);
    assert!(optional_header::is_magic_known(opt.magic.get()));
    assert_eq!(optional_header::magic_to_str(opt.magic.get()), "PE32 Image (PE)");
    assert_eq!(opt.address_of_entry_point.get(), 0x1110);
    assert_eq!(optional_header::base_of_data(&opt), Some(0x2000));

    // the section table starts right after the optional header
    let sections = optional_start + coff.size_of_optional_header.get() as usize;
    assert_eq!(&bytes[sections..sections + 5], b".text");
}

#[test]
fn coff_header_at_end_of_buffer() {
    init_logging();
    let bytes = &CRSS_HEADER[..0xd4 + SIZEOF_COFF_HEADER - 1];
    let mut offset = 0xd4;
    let res = header::parse_coff_header(bytes, &mut offset, scroll::LE);
    assert!(matches!(res, Err(error::Error::Scroll(_))));
}

#[test]
fn optional_header_with_unrecognised_magic() {
    init_logging();
    let mut bytes = CRSS_HEADER;
    let optional_start = 0xd4 + SIZEOF_COFF_HEADER;
    bytes[optional_start..optional_start + 2].copy_from_slice(&[0x99, 0x09]);

    let mut offset = optional_start;
    let strict = optional_header::parse_optional_header(
        &bytes,
        &mut offset,
        scroll::LE,
        &ParseOptions::strict(),
    );
    match strict {
        Err(error::Error::BadMagic(magic)) => assert_eq!(magic, 0x999),
        other => panic!("expected a bad magic error, got {:?}", other),
    }

    let mut offset = optional_start;
    let opt = optional_header::parse_optional_header(
        &bytes,
        &mut offset,
        scroll::LE,
        &ParseOptions::permissive(),
    )
    .unwrap();
    assert_eq!(optional_header::magic_to_str(opt.magic.get()), "Unrecognised (PE)");
    assert_eq!(optional_header::base_of_data(&opt), None);
}

#[test]
fn catalogs_read_from_many_threads() {
    std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4u16)
            .map(|worker| {
                scope.spawn(move || {
                    let mut known = 0usize;
                    for code in (worker..=u16::MAX).step_by(4) {
                        assert!(!header::machine_to_str(code).is_empty());
                        assert!(!optional_header::magic_to_str(code).is_empty());
                        assert!(!characteristic_to_str(code).is_empty());
                        if header::is_machine_known(code) {
                            known += 1;
                        }
                    }
                    known
                })
            })
            .collect();
        let known: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
        // 25 entries, one code listed twice
        assert_eq!(known, header::MACHINES.len() - 1);
    });
}
