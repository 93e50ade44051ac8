use std::fmt;

mod table;

pub use table::AVR_OPCODES;

/// Smallest core an encoding is available on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvrArch {
    /// Every AVR
    Avr1,
    /// Every AVR except the reduced core
    Avr1nRc,
    Avr2,
    Avr2nRc,
    Avr25,
    Avr4,
    /// Parts with more than 8 KiB of flash (jmp/call)
    AvrM,
    /// Parts with more than 64 KiB of flash (elpm)
    AvrL,
    /// Parts with more than 128 KiB of flash (eijmp/eicall)
    AvrXl,
    /// XMEGA
    AvrXm,
    /// XMEGA and AVRxt
    AvrXtm,
    /// Reduced core only (TPI parts)
    AvrRc,
}

#[derive(Debug, PartialEq, Eq)]
pub struct AvrOpcode {
    pub mask: u16,
    pub value: u16,
    pub nwords: u8,
    pub bits: &'static str,
    pub arch: AvrArch,
    pub id: &'static str,
    pub mnemonic: &'static str,
    pub operands: &'static str,
    pub description: &'static str,
    pub operation: &'static str,
    pub flags: &'static str,
    /// Cycles on AVRe, AVRxm, AVRxt and AVRrc
    pub clocks: [&'static str; 4],
    pub remarks: &'static str,
}

impl AvrOpcode {
    pub fn matches(&self, word: u16) -> bool {
        word & self.mask == self.value
    }

    /// Encodings with no documented meaning that the silicon still executes
    pub fn is_unallocated(&self) -> bool {
        self.id.starts_with("x_")
    }

    pub fn available(&self, reduced_core: bool) -> bool {
        if reduced_core {
            self.arch == AvrArch::AvrRc
                || (!matches!(self.arch, AvrArch::Avr1nRc | AvrArch::Avr2nRc)
                    && self.clocks[3] != "n/a")
        } else {
            self.arch != AvrArch::AvrRc
        }
    }

    /// Value and width of the operand field marked by `letter` in the bit
    /// pattern, read most significant bit first
    fn field(&self, code: u32, letter: char) -> Option<(u32, u32)> {
        let pattern: Vec<char> = self.bits.chars().filter(|c| !c.is_whitespace()).collect();
        let len = pattern.len();

        let mut value = 0;
        let mut width = 0;
        for (i, _) in pattern.iter().enumerate().filter(|(_, c)| **c == letter) {
            let bit = (code >> (len - 1 - i)) & 1;
            value = (value << 1) | bit;
            width += 1;
        }

        (width > 0).then_some((value, width))
    }
}

/// Find the opcode for the first word of an instruction.
///
/// The most specific mask wins; on a tie the earlier table entry wins.
/// Reduced core encodings are only considered when `reduced_core` is set,
/// and encodings missing from the reduced core are skipped then.
pub fn decode(word: u16, reduced_core: bool) -> Option<&'static AvrOpcode> {
    let mut best: Option<&'static AvrOpcode> = None;

    for op in AVR_OPCODES.iter() {
        if !op.matches(word) || !op.available(reduced_core) {
            continue;
        }
        let better = match best {
            Some(current) => op.mask.count_ones() > current.mask.count_ones(),
            None => true,
        };
        if better {
            best = Some(op);
        }
    }

    best
}

/// One disassembled instruction, or a data word that decodes to nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: usize,
    pub bytes: Vec<u8>,
    pub opcode: Option<&'static AvrOpcode>,
    pub operands: Vec<String>,
    /// Absolute byte address of a relative jump or branch
    pub target: Option<usize>,
}

impl Instruction {
    fn data(address: usize, bytes: &[u8]) -> Self {
        Instruction {
            address,
            bytes: bytes.to_vec(),
            opcode: None,
            operands: Vec::new(),
            target: None,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(op) = self.opcode else {
            return match self.bytes.as_slice() {
                [lo, hi] => write!(f, ".word 0x{:04x}", u16::from_le_bytes([*lo, *hi])),
                bytes => {
                    let rendered: Vec<String> =
                        bytes.iter().map(|b| format!("0x{:02x}", b)).collect();
                    write!(f, ".byte {}", rendered.join(", "))
                }
            };
        };

        if self.operands.is_empty() {
            write!(f, "{}", op.mnemonic)?;
        } else {
            write!(f, "{:<7} {}", op.mnemonic, self.operands.join(", "))?;
        }

        if let Some(target) = self.target {
            write!(f, "  ; 0x{:04x}", target)?;
        } else if op.is_unallocated() {
            write!(f, "  ; unallocated")?;
        }
        Ok(())
    }
}

fn sign_extend(value: u32, width: u32) -> i64 {
    let shift = 64 - width;
    ((value as i64) << shift) >> shift
}

fn register(op: &AvrOpcode, bits: u32, width: u32) -> u32 {
    match width {
        2 => 24 + 2 * bits,
        3 => 16 + bits,
        4 if op.id == "movw" => 2 * bits,
        4 => 16 + bits,
        // Rd repeated as Rr, e.g. "0010 00dd dddd dddd"
        10 => (bits >> 4) & 0x1f,
        _ => bits,
    }
}

/// Data address of the reduced core's 7 bit lds/sts form
fn rc_data_address(k: u32) -> u32 {
    let k4 = (k >> 4) & 1;
    ((k4 ^ 1) << 7) | (k4 << 6) | (((k >> 6) & 1) << 5) | (((k >> 5) & 1) << 4) | (k & 0xf)
}

struct Rendered {
    operands: Vec<String>,
    target: Option<usize>,
}

fn render_operands(op: &AvrOpcode, code: u32, address: usize) -> Rendered {
    let mut rendered = Rendered {
        operands: Vec::new(),
        target: None,
    };
    if op.operands.is_empty() || op.operands == "-" {
        return rendered;
    }

    let reg = |primary: char, fallback: char| {
        op.field(code, primary)
            .or_else(|| op.field(code, fallback))
            .map(|(bits, width)| format!("r{}", register(op, bits, width)))
    };

    for token in op.operands.split(", ") {
        let text = match token {
            "Rd" => reg('d', 'r'),
            "Rr" => reg('r', 'd'),
            "K" => op.field(code, 'K').map(|(k, _)| format!("0x{:02x}", k)),
            "A" => op.field(code, 'A').map(|(a, _)| format!("0x{:02x}", a)),
            "b" => op.field(code, 'b').map(|(b, _)| b.to_string()),
            "s" => op.field(code, 's').map(|(s, _)| s.to_string()),
            "k" => op.field(code, 'k').map(|(k, width)| {
                if op.operation.contains("PC+k+1") {
                    let offset = 2 * sign_extend(k, width);
                    let target = (address as i64 + 2 + offset).max(0) as usize;
                    rendered.target = Some(target);
                    format!(".{:+}", offset)
                } else if width == 22 {
                    format!("0x{:x}", 2 * k)
                } else if width == 7 {
                    format!("0x{:02x}", rc_data_address(k))
                } else {
                    format!("0x{:04x}", k)
                }
            }),
            _ if token.ends_with("+q") => op
                .field(code, 'q')
                .map(|(q, _)| format!("{}{}", token.trim_end_matches('q'), q)),
            _ => None,
        };
        rendered.operands.push(text.unwrap_or_else(|| token.to_string()));
    }

    rendered
}

/// Disassemble little-endian program memory starting at byte address `base`
pub fn disassemble(bytes: &[u8], base: usize, reduced_core: bool) -> Vec<Instruction> {
    let mut listing = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let address = base + pos;
        if pos + 2 > bytes.len() {
            listing.push(Instruction::data(address, &bytes[pos..]));
            break;
        }
        let word = u16::from_le_bytes([bytes[pos], bytes[pos + 1]]);

        let Some(op) = decode(word, reduced_core) else {
            listing.push(Instruction::data(address, &bytes[pos..pos + 2]));
            pos += 2;
            continue;
        };

        let len = 2 * op.nwords as usize;
        let Some(raw) = bytes.get(pos..pos + len) else {
            listing.push(Instruction::data(address, &bytes[pos..pos + 2]));
            pos += 2;
            continue;
        };

        let code = if op.nwords == 2 {
            (u32::from(word) << 16) | u32::from(u16::from_le_bytes([raw[2], raw[3]]))
        } else {
            u32::from(word)
        };
        let Rendered { operands, target } = render_operands(op, code, address);

        listing.push(Instruction {
            address,
            bytes: raw.to_vec(),
            opcode: Some(op),
            operands,
            target,
        });
        pos += len;
    }

    listing
}
