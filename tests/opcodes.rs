#[cfg(test)]
mod tests {
    use avrprog::opcodes::{AVR_OPCODES, AvrArch, decode, disassemble};

    fn mnemonic(word: u16) -> Option<&'static str> {
        decode(word, false).map(|op| op.mnemonic)
    }

    fn listing(bytes: &[u8]) -> Vec<String> {
        disassemble(bytes, 0, false)
            .iter()
            .map(|i| i.to_string())
            .collect()
    }

    #[test]
    fn test_table_is_consistent() {
        assert_eq!(AVR_OPCODES.len(), 164);

        for op in AVR_OPCODES.iter() {
            assert_eq!(op.value & !op.mask, 0, "{} has value bits outside its mask", op.id);
            assert!(op.nwords == 1 || op.nwords == 2);

            let bits = op.bits.chars().filter(|c| !c.is_whitespace()).count();
            assert_eq!(bits, 16 * op.nwords as usize, "{} pattern length", op.id);

            // Fixed bits of the first word agree with mask and value
            for (i, c) in op.bits.chars().filter(|c| !c.is_whitespace()).take(16).enumerate() {
                let bit = 15 - i;
                match c {
                    '0' | '1' => {
                        assert!(op.mask & (1 << bit) != 0, "{} bit {}", op.id, bit);
                        assert_eq!((op.value >> bit) & 1, (c == '1') as u16, "{}", op.id);
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_decode_most_specific() {
        assert_eq!(mnemonic(0x0000), Some("nop"));
        assert_eq!(mnemonic(0x9508), Some("ret"));
        assert_eq!(mnemonic(0x9478), Some("sei"));
        assert_eq!(mnemonic(0x94f8), Some("cli"));
        // ldi r16, 0xff is also ser r16
        assert_eq!(mnemonic(0xef0f), Some("ser"));
        assert_eq!(mnemonic(0xe00f), Some("ldi"));
        // ld Rd, Y is more specific than ldd Rd, Y+q
        assert_eq!(mnemonic(0x8008), Some("ld"));
        assert_eq!(mnemonic(0x8009), Some("ldd"));
        assert_eq!(mnemonic(0xf409), Some("brne"));
    }

    #[test]
    fn test_decode_ties_pick_first_entry() {
        // and/tst and eor/clr share mask and value
        assert_eq!(decode(0x2000, false).map(|op| op.id), Some("and"));
        assert_eq!(decode(0x2411, false).map(|op| op.id), Some("eor"));
        assert_eq!(decode(0xf000, false).map(|op| op.id), Some("brcs"));
    }

    #[test]
    fn test_reduced_core() {
        // 7 bit lds exists only on the reduced core
        let op = decode(0xa000, true).unwrap();
        assert_eq!(op.id, "lds_rc");
        assert_eq!(op.arch, AvrArch::AvrRc);

        let op = decode(0xa000, false).unwrap();
        assert_eq!(op.mnemonic, "ldd");

        // No lpm on the reduced core
        assert!(decode(0x95c8, true).is_none());
        assert_eq!(mnemonic(0x95c8), Some("lpm"));
    }

    #[test]
    fn test_unallocated_encodings() {
        let op = decode(0x0001, false).unwrap();
        assert_eq!(op.id, "x_nop_1");
        assert!(op.is_unallocated());
        assert!(!decode(0x0000, false).unwrap().is_unallocated());
    }

    #[test]
    fn test_disassemble_registers_and_immediates() {
        // ldi r16, 0x2a; eor r1, r1; out 0x3f, r1; movw r24, r30; adiw r28, 0x01
        let code = [0x0a, 0xe2, 0x11, 0x24, 0x1f, 0xbe, 0xcf, 0x01, 0x21, 0x96];
        assert_eq!(
            listing(&code),
            [
                "ldi     r16, 0x2a",
                "eor     r1, r1",
                "out     0x3f, r1",
                "movw    r24, r30",
                "adiw    r28, 0x01",
            ]
        );
    }

    #[test]
    fn test_disassemble_jumps() {
        // jmp 0x68; rjmp .-2; breq .+4; ret
        let code = [0x0c, 0x94, 0x34, 0x00, 0xff, 0xcf, 0x11, 0xf0, 0x08, 0x95];
        let listing = disassemble(&code, 0x100, false);

        assert_eq!(listing.len(), 4);
        assert_eq!(listing[0].to_string(), "jmp     0x68");
        assert_eq!(listing[0].len(), 4);
        assert_eq!(listing[1].address, 0x104);
        assert_eq!(listing[1].target, Some(0x104));
        assert_eq!(listing[1].to_string(), "rjmp    .-2  ; 0x0104");
        assert_eq!(listing[2].target, Some(0x10c));
        assert_eq!(listing[2].to_string(), "breq    .+4  ; 0x010c");
        assert_eq!(listing[3].to_string(), "ret");
    }

    #[test]
    fn test_disassemble_displacement_and_pointers() {
        // ldd r24, Y+5; st X+, r0; lds r18, 0x0100
        let code = [0x8d, 0x81, 0x0d, 0x92, 0x20, 0x91, 0x00, 0x01];
        assert_eq!(
            listing(&code),
            ["ldd     r24, Y+5", "st      X+, r0", "lds     r18, 0x0100"]
        );
    }

    #[test]
    fn test_disassemble_trailing_bytes() {
        // call needs a second word that is not there, then an odd byte
        assert_eq!(listing(&[0x0e, 0x94]), [".word 0x940e"]);
        assert_eq!(listing(&[0x08, 0x95, 0xaa]), ["ret", ".byte 0xaa"]);
        assert!(disassemble(&[], 0, false).is_empty());
    }
}
