#[cfg(test)]
mod tests {
    use avrprog::AvrError;
    use avrprog::firmware::{pad_to_page, parse_intel_hex, read_hex_file, to_intel_hex};

    #[test]
    fn test_records_at_absolute_addresses() {
        let hex = ":0400000001020304F2\n\
                   :02000800AABB91\n\
                   :00000001FF\n";
        let image = parse_intel_hex(hex).unwrap();

        assert_eq!(
            image,
            [0x01, 0x02, 0x03, 0x04, 0xff, 0xff, 0xff, 0xff, 0xaa, 0xbb]
        );
    }

    #[test]
    fn test_extended_linear_address() {
        let hex = ":020000040001F9\n\
                   :0100000042BD\n\
                   :00000001FF\n";
        let image = parse_intel_hex(hex).unwrap();

        assert_eq!(image.len(), 0x10001);
        assert_eq!(image[0x10000], 0x42);
        assert!(image[..0x10000].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn test_extended_segment_address() {
        let hex = ":020000021000EC\n\
                   :0100000042BD\n\
                   :00000001FF\n";
        let image = parse_intel_hex(hex).unwrap();
        assert_eq!(image.len(), 0x10001);
        assert_eq!(image[0x10000], 0x42);
    }

    #[test]
    fn test_bad_checksum() {
        let result = parse_intel_hex(":0400000001020304F3\n:00000001FF\n");
        assert!(matches!(result, Err(AvrError::FirmwareError(_))));
    }

    #[test]
    fn test_pad_to_page() {
        let mut image = vec![0u8; 130];
        pad_to_page(&mut image, 128);
        assert_eq!(image.len(), 256);
        assert!(image[130..].iter().all(|&b| b == 0xff));

        let mut aligned = vec![0u8; 128];
        pad_to_page(&mut aligned, 128);
        assert_eq!(aligned.len(), 128);

        let mut empty = Vec::new();
        pad_to_page(&mut empty, 128);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_hex_output_parses_back() {
        let image: Vec<u8> = (0..0x10010).map(|i| (i % 251) as u8).collect();
        let hex = to_intel_hex(&image).unwrap();

        let upper = hex.to_uppercase();
        assert!(upper.contains(":020000040001F9"));
        assert!(upper.trim_end().ends_with(":00000001FF"));
        assert_eq!(parse_intel_hex(&hex).unwrap(), image);
    }

    #[test]
    fn test_read_hex_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blink.hex");
        std::fs::write(&path, ":0400000001020304F2\n:00000001FF\n").unwrap();

        assert_eq!(read_hex_file(&path).unwrap(), [1, 2, 3, 4]);
        assert!(matches!(
            read_hex_file(dir.path().join("missing.hex")),
            Err(AvrError::FirmwareError(_))
        ));
    }
}
