use super::{AvrArch, AvrOpcode};

macro_rules! op {
    ($mask:expr, $value:expr, $nwords:expr, $bits:expr, $arch:ident, $id:expr, $mnemonic:expr,
     $operands:expr, $description:expr, $operation:expr, $flags:expr, [$($clock:expr),*],
     $remarks:expr) => {
        AvrOpcode {
            mask: $mask,
            value: $value,
            nwords: $nwords,
            bits: $bits,
            arch: AvrArch::$arch,
            id: $id,
            mnemonic: $mnemonic,
            operands: $operands,
            description: $description,
            operation: $operation,
            flags: $flags,
            clocks: [$($clock),*],
            remarks: $remarks,
        }
    };
}

#[rustfmt::skip]
pub static AVR_OPCODES: [AvrOpcode; 164] = [
    // Arithmetic and logic
    op!(0xfc00, 0x0c00, 1, "0000 11rd dddd rrrr", Avr1, "add", "add", "Rd, Rr", "Add without Carry", "Rd <-- Rd+Rr", "Z,C,N,V,S,H", ["1", "1", "1", "1"], ""),
    op!(0xfc00, 0x1c00, 1, "0001 11rd dddd rrrr", Avr1, "adc", "adc", "Rd, Rr", "Add with Carry", "Rd <-- Rd+Rr+C", "Z,C,N,V,S,H", ["1", "1", "1", "1"], ""),
    op!(0xff00, 0x9600, 1, "1001 0110 KKdd KKKK", Avr2nRc, "adiw", "adiw", "Rd, K", "Add Immediate to Word", "Rd <-- Rd+1:Rd+K", "Z,C,N,V,S", ["2", "2", "2", "n/a"], "d in {24, 26, 28, 30}"),
    op!(0xfc00, 0x1800, 1, "0001 10rd dddd rrrr", Avr1, "sub", "sub", "Rd, Rr", "Subtract without Carry", "Rd <-- Rd-Rr", "Z,C,N,V,S,H", ["1", "1", "1", "1"], ""),
    op!(0xf000, 0x5000, 1, "0101 KKKK dddd KKKK", Avr1, "subi", "subi", "Rd, K", "Subtract Immediate", "Rd <-- Rd-K", "Z,C,N,V,S,H", ["1", "1", "1", "1"], ""),
    op!(0xfc00, 0x0800, 1, "0000 10rd dddd rrrr", Avr1, "sbc", "sbc", "Rd, Rr", "Subtract with Carry", "Rd <-- Rd-Rr-C", "Z,C,N,V,S,H", ["1", "1", "1", "1"], ""),
    op!(0xf000, 0x4000, 1, "0100 KKKK dddd KKKK", Avr1, "sbci", "sbci", "Rd, K", "Subtract Immediate with Carry", "Rd <-- Rd-K-C", "Z,C,N,V,S,H", ["1", "1", "1", "1"], "d=16..31"),
    op!(0xff00, 0x9700, 1, "1001 0111 KKdd KKKK", Avr2nRc, "sbiw", "sbiw", "Rd, K", "Subtract Immediate from Word", "Rd+1:Rd <-- Rd+1:Rd-K", "Z,C,N,V,S", ["2", "2", "2", "n/a"], "d in {24, 26, 28, 30}"),
    op!(0xfc00, 0x2000, 1, "0010 00rd dddd rrrr", Avr1, "and", "and", "Rd, Rr", "Logical AND", "Rd <-- Rd & Rr", "Z,N,V,S", ["1", "1", "1", "1"], ""),
    op!(0xf000, 0x7000, 1, "0111 KKKK dddd KKKK", Avr1, "andi", "andi", "Rd, K", "Logical AND with Immediate", "Rd <-- Rd & K", "Z,N,V,S", ["1", "1", "1", "1"], "d = 16..31"),
    op!(0xfc00, 0x2800, 1, "0010 10rd dddd rrrr", Avr1, "or", "or", "Rd, Rr", "Logical OR", "Rd <-- Rd|Rr", "Z,N,V,S", ["1", "1", "1", "1"], ""),
    op!(0xf000, 0x6000, 1, "0110 KKKK dddd KKKK", Avr1, "ori", "ori", "Rd, K", "Logical OR with Immediate", "Rd <-- Rd|K", "Z,N,V,S", ["1", "1", "1", "1"], ""),
    op!(0xfc00, 0x2400, 1, "0010 01rd dddd rrrr", Avr1, "eor", "eor", "Rd, Rr", "Exclusive OR", "Rd <-- Rd^Rr", "Z,N,V,S", ["1", "1", "1", "1"], ""),
    op!(0xfe0f, 0x9400, 1, "1001 010d dddd 0000", Avr1, "com", "com", "Rd", "One's Complement", "Rd <-- $FF-Rd", "Z,C,N,V,S", ["1", "1", "1", "1"], ""),
    op!(0xfe0f, 0x9401, 1, "1001 010d dddd 0001", Avr1, "neg", "neg", "Rd", "Two's Complement", "Rd <-- $00-Rd", "Z,C,N,V,S,H", ["1", "1", "1", "1"], ""),
    op!(0xf000, 0x6000, 1, "0110 KKKK dddd KKKK", Avr1, "sbr", "sbr", "Rd, K", "Set Bit(s) in Register", "Rd <-- Rd or K", "Z,N,V,S", ["1", "1", "1", "1"], "alias for ORI Rd, K"),
    op!(0xf000, 0x7000, 1, "0111 KKKK dddd KKKK", Avr1, "cbr", "cbr", "Rd, K", "Clear Bit(s) in Register", "Rd <-- Rd & ($FFh-K)", "Z,N,V,S", ["1", "1", "1", "1"], "alias for ANDI Rd, (0xFF - K)"),
    op!(0xfe0f, 0x9403, 1, "1001 010d dddd 0011", Avr1, "inc", "inc", "Rd", "Increment", "Rd <-- Rd+1", "Z,N,V,S", ["1", "1", "1", "1"], ""),
    op!(0xfe0f, 0x940a, 1, "1001 010d dddd 1010", Avr1, "dec", "dec", "Rd", "Decrement", "Rd <-- Rd-1", "Z,N,V,S", ["1", "1", "1", "1"], ""),
    op!(0xfc00, 0x2000, 1, "0010 00dd dddd dddd", Avr1, "tst", "tst", "Rd", "Test for Zero or Minus", "Rd <-- Rd & Rd", "Z,N,V,S", ["1", "1", "1", "1"], "alias for AND Rd, Rd"),
    op!(0xfc00, 0x2400, 1, "0010 01dd dddd dddd", Avr1, "clr", "clr", "Rd", "Clear Register", "Rd <-- Rd xor Rd", "Z,N,V,S", ["1", "1", "1", "1"], "alias for EOR Rd, Rd"),
    op!(0xff0f, 0xef0f, 1, "1110 1111 dddd 1111", Avr1, "ser", "ser", "Rd", "Set Register", "Rd <-- $FF", "None", ["1", "1", "1", "1"], "alias for LDI Rd, 0xFF"),
    op!(0xfc00, 0x9c00, 1, "1001 11rd dddd rrrr", Avr4, "mul", "mul", "Rd, Rr", "Multiply Unsigned", "R1:R0 <-- Rd x Rr (UU)", "Z,C", ["2", "2", "2", "n/a"], ""),
    op!(0xff00, 0x0200, 1, "0000 0010 dddd rrrr", Avr4, "muls", "muls", "Rd, Rr", "Multiply Signed", "R1:R0 <-- Rd x Rr (SS)", "Z,C", ["2", "2", "2", "n/a"], "d, r=16..31"),
    op!(0xff88, 0x0300, 1, "0000 0011 0ddd 0rrr", Avr4, "mulsu", "mulsu", "Rd, Rr", "Multiply Signed with Unsigned", "R1:R0 <-- Rd x Rr (SU)", "Z,C", ["2", "2", "2", "n/a"], "d, r=16..23"),
    op!(0xff88, 0x0308, 1, "0000 0011 0ddd 1rrr", Avr4, "fmul", "fmul", "Rd, Rr", "Fractional Multiply Unsigned", "R1:R0 <-- Rd x Rr<<1 (UU)", "Z,C", ["2", "2", "2", "n/a"], "r, d = 16..23"),
    op!(0xff88, 0x0380, 1, "0000 0011 1ddd 0rrr", Avr4, "fmuls", "fmuls", "Rd, Rr", "Fractional Multiply Signed", "R1:R0 <-- Rd x Rr<<1 (SS)", "Z,C", ["2", "2", "2", "n/a"], "r, d = 16..23"),
    op!(0xff88, 0x0388, 1, "0000 0011 1ddd 1rrr", Avr4, "fmulsu", "fmulsu", "Rd, Rr", "Fractional Multiply Signed with Unsigned", "R1:R0 <-- Rd x Rr<<1 (SU)", "Z,C", ["2", "2", "2", "n/a"], "r, d = 16..23"),
    op!(0xff0f, 0x940b, 1, "1001 0100 KKKK 1011", AvrXm, "des", "des", "K", "Data Encryption", "if (H = 0) then R15:R0 <-- Encrypt(R15:R0, K) if (H = 1) then R15:R0 <-- Decrypt(R15:R0, K)", "-", ["n/a", "1/2", "n/a", "n/a"], ""),

    // Branches
    op!(0xf000, 0xc000, 1, "1100 kkkk kkkk kkkk", Avr1, "rjmp", "rjmp", "k", "Relative Jump", "PC <-- PC+k+1", "None", ["2", "2", "2", "2"], ""),
    op!(0xffff, 0x9409, 1, "1001 0100 0000 1001", Avr2, "ijmp", "ijmp", "Z", "Indirect Jump to (Z)", "PC(15:0) <-- Z, PC(21:16) <-- 0", "None", ["2", "2", "2", "2"], ""),
    op!(0xffff, 0x9419, 1, "1001 0100 0001 1001", AvrXl, "eijmp", "eijmp", "EIND:Z", "Extended Indirect Jump to (Z)", "PC(15:0) <-- Z, PC(21:16) <-- EIND", "None", ["2", "2", "2", "n/a"], ""),
    op!(0xfe0e, 0x940c, 2, "1001 010k kkkk 110k  kkkk kkkk kkkk kkkk", AvrM, "jmp", "jmp", "k", "Jump", "PC <-- k", "None", ["3", "3", "3", "n/a"], ""),
    op!(0xf000, 0xd000, 1, "1101 kkkk kkkk kkkk", Avr1, "rcall", "rcall", "k", "Relative Call Subroutine", "PC <-- PC+k+1", "None", ["3/4", "2/3", "2/3", "3"], ""),
    op!(0xffff, 0x9509, 1, "1001 0101 0000 1001", Avr2, "icall", "icall", "Z", "Indirect Call to (Z)", "PC(15:0) <-- Z, PC(21:16) <-- 0", "None", ["3/4", "2/3", "2/3", "3"], ""),
    op!(0xffff, 0x9519, 1, "1001 0101 0001 1001", AvrXl, "eicall", "eicall", "EIND:Z", "Extended Indirect Call to (Z)", "PC(15:0) <-- Z, PC(21:16) <-- EIND", "None", ["4", "3", "3", "n/a"], ""),
    op!(0xfe0e, 0x940e, 2, "1001 010k kkkk 111k  kkkk kkkk kkkk kkkk", AvrM, "call", "call", "k", "call Subroutine", "PC <-- k, STACK <-- PC, SP <-- SP-2", "None", ["4/5", "3/4", "3/4", "n/a"], ""),
    op!(0xffff, 0x9508, 1, "1001 0101 0000 1000", Avr1, "ret", "ret", "-", "Subroutine Return", "PC <-- STACK", "None", ["4/5", "4/5", "4/5", "6"], ""),
    op!(0xffff, 0x9518, 1, "1001 0101 0001 1000", Avr1, "reti", "reti", "-", "Interrupt Return", "PC <-- STACK", "I", ["4/5", "4/5", "4/5", "6"], ""),
    op!(0xfc00, 0x1000, 1, "0001 00rd dddd rrrr", Avr1, "cpse", "cpse", "Rd, Rr", "Compare, Skip if Equal", "if(Rd=Rr)PC <-- PC+2or3", "None", ["1-3", "1-3", "1-3", "1/2"], ""),
    op!(0xfc00, 0x1400, 1, "0001 01rd dddd rrrr", Avr1, "cp", "cp", "Rd, Rr", "Compare", "Rd - Rr", "Z,C,N,V,S,H", ["1", "1", "1", "1"], ""),
    op!(0xfc00, 0x0400, 1, "0000 01rd dddd rrrr", Avr1, "cpc", "cpc", "Rd, Rr", "Compare with Carry", "Rd - Rr - C", "Z,C,N,V,S,H", ["1", "1", "1", "1"], ""),
    op!(0xf000, 0x3000, 1, "0011 KKKK dddd KKKK", Avr1, "cpi", "cpi", "Rd, K", "Compare with Immediate", "Rd - K", "Z,C,N,V,S,H", ["1", "1", "1", "1"], "d = 16..31"),
    op!(0xfe08, 0xfc00, 1, "1111 110r rrrr 0bbb", Avr1, "sbrc", "sbrc", "Rr, b", "Skip if Bit in Register Cleared", "if(Rr(b)=0)PC <-- PC+2or3", "None", ["1-3", "1-3", "1-3", "1/2"], ""),
    op!(0xfe08, 0xfe00, 1, "1111 111r rrrr 0bbb", Avr1, "sbrs", "sbrs", "Rr, b", "Skip if Bit in Register Set", "if(Rr(b)=1)PC <-- PC+2or3", "None", ["1-3", "1-3", "1-3", "1/2"], ""),
    op!(0xff00, 0x9900, 1, "1001 1001 AAAA Abbb", Avr1, "sbic", "sbic", "A, b", "Skip if Bit in I/O Register Cleared", "if(I/O(A,b)=0)PC <-- PC+2or3", "None", ["1-3", "2-4", "1-3", "1/2"], ""),
    op!(0xff00, 0x9b00, 1, "1001 1011 AAAA Abbb", Avr1, "sbis", "sbis", "A, b", "Skip if Bit in I/O Register Set", "If(I/O(A,b)=1)PC <-- PC+2or3", "None", ["1-3", "2-4", "1-3", "1/2"], ""),
    op!(0xfc07, 0xf000, 1, "1111 00kk kkkk k000", Avr1, "brcs", "brcs", "k", "Branch if Carry Set", "if(C=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 0, k (C Carry)"),
    op!(0xfc07, 0xf000, 1, "1111 00kk kkkk k000", Avr1, "brlo", "brlo", "k", "Branch if Lower", "if(C=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 0, k (C Carry)"),
    op!(0xfc07, 0xf001, 1, "1111 00kk kkkk k001", Avr1, "breq", "breq", "k", "Branch if Equal", "if(Z=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 1, k (Z Zero)"),
    op!(0xfc07, 0xf002, 1, "1111 00kk kkkk k010", Avr1, "brmi", "brmi", "k", "Branch if Minus", "if(N=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 2, k (N Negative)"),
    op!(0xfc07, 0xf003, 1, "1111 00kk kkkk k011", Avr1, "brvs", "brvs", "k", "Branch if Overflow Flag is Set", "if(V=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 3, k (V Overflow in two's complement)"),
    op!(0xfc07, 0xf004, 1, "1111 00kk kkkk k100", Avr1, "brlt", "brlt", "k", "Branch if Less Than, Signed", "if(N^V=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 4, k (S Sign)"),
    op!(0xfc07, 0xf005, 1, "1111 00kk kkkk k101", Avr1, "brhs", "brhs", "k", "Branch if Half Carry Flag Set", "if(H=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 5, k (H Half carry)"),
    op!(0xfc07, 0xf006, 1, "1111 00kk kkkk k110", Avr1, "brts", "brts", "k", "Branch if T Flag Set", "if(T=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 6, k (T Transfer bit)"),
    op!(0xfc07, 0xf007, 1, "1111 00kk kkkk k111", Avr1, "brie", "brie", "k", "Branch if Interrupt Enabled", "if(I=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBS 7, k (I Interrupt enable)"),
    op!(0xfc00, 0xf000, 1, "1111 00kk kkkk ksss", Avr1, "brbs", "brbs", "s, k", "Branch if Status Flag Set", "if(SREG(s)=1)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], ""),
    op!(0xfc07, 0xf400, 1, "1111 01kk kkkk k000", Avr1, "brcc", "brcc", "k", "Branch if Carry Cleared", "if(C=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 0, k (C Carry)"),
    op!(0xfc07, 0xf400, 1, "1111 01kk kkkk k000", Avr1, "brsh", "brsh", "k", "Branch if Same or Higher", "if(C=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 0, k (C Carry)"),
    op!(0xfc07, 0xf401, 1, "1111 01kk kkkk k001", Avr1, "brne", "brne", "k", "Branch if Not Equal", "if(Z=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 1, k (Z Zero)"),
    op!(0xfc07, 0xf402, 1, "1111 01kk kkkk k010", Avr1, "brpl", "brpl", "k", "Branch if Plus", "if(N=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 2, k (N Negative)"),
    op!(0xfc07, 0xf403, 1, "1111 01kk kkkk k011", Avr1, "brvc", "brvc", "k", "Branch if Overflow Flag is Cleared", "if(V=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 3, k (V Overflow in two's complement)"),
    op!(0xfc07, 0xf404, 1, "1111 01kk kkkk k100", Avr1, "brge", "brge", "k", "Branch if Greater or Equal, Signed", "if(N^V=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 4, k (S Sign)"),
    op!(0xfc07, 0xf405, 1, "1111 01kk kkkk k101", Avr1, "brhc", "brhc", "k", "Branch if Half Carry Flag Cleared", "if(H=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 5, k (H Half carry)"),
    op!(0xfc07, 0xf406, 1, "1111 01kk kkkk k110", Avr1, "brtc", "brtc", "k", "Branch if T Flag Cleared", "if(T=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 6, k (T Transfer bit)"),
    op!(0xfc07, 0xf407, 1, "1111 01kk kkkk k111", Avr1, "brid", "brid", "k", "Branch if Interrupt Disabled", "if(I=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], "alias for BRBC 7, k (I Interrupt enable)"),
    op!(0xfc00, 0xf400, 1, "1111 01kk kkkk ksss", Avr1, "brbc", "brbc", "s, k", "Branch if Status Flag Cleared", "if(SREG(s)=0)thenPC <-- PC+k+1", "None", ["1/2", "1/2", "1/2", "1/2"], ""),

    // Data transfer
    op!(0xfc00, 0x2c00, 1, "0010 11rd dddd rrrr", Avr1, "mov", "mov", "Rd, Rr", "Copy Register", "Rd <-- Rr", "None", ["1", "1", "1", "1"], ""),
    op!(0xff00, 0x0100, 1, "0000 0001 dddd rrrr", Avr25, "movw", "movw", "Rd, Rr", "Copy Register Pair", "Rd+1:Rd <-- Rr+1:Rr", "None", ["1", "1", "1", "n/a"], ""),
    op!(0xf000, 0xe000, 1, "1110 KKKK dddd KKKK", Avr1, "ldi", "ldi", "Rd, K", "Load Immediate", "Rd <-- K", "None", ["1", "1", "1", "1"], "d=16..31"),
    op!(0xfe0f, 0x9000, 2, "1001 000d dddd 0000  kkkk kkkk kkkk kkkk", Avr2nRc, "lds", "lds", "Rd, k", "Load Direct from data space", "Rd <-- (k)", "None", ["2", "3", "3", "2"], ""),
    op!(0xf800, 0xa000, 1, "1010 0kkk dddd kkkk", AvrRc, "lds_rc", "lds", "Rd, k", "Load Direct from data space", "Rd <-- (k)", "None", ["n/a", "n/a", "n/a", "2"], "AVRrc only (TPI parts)"),
    op!(0xfe0f, 0x900c, 1, "1001 000d dddd 1100", Avr2, "ld_1", "ld", "Rd, X", "Load Indirect", "Rd <-- (X)", "None", ["2", "2", "2", "1/2"], ""),
    op!(0xfe0f, 0x900d, 1, "1001 000d dddd 1101", Avr2, "ld_2", "ld", "Rd, X+", "Load Indirect and Post-Increment", "Rd <-- (X) X <-- X+1", "None", ["2", "2", "2", "2/3"], ""),
    op!(0xfe0f, 0x900e, 1, "1001 000d dddd 1110", Avr2, "ld_3", "ld", "Rd, -X", "Load Indirect and Pre-Decrement", "X <-- X-1, <-- X-1 Rd <-- (X) <-- (X)", "None", ["2", "3", "2", "2/3"], ""),
    op!(0xfe0f, 0x8008, 1, "1000 000d dddd 1000", Avr2, "ld_4", "ld", "Rd, Y", "Load Indirect", "Rd <-- (Y) <-- (Y)", "None", ["2", "2", "2", "1/2"], "alias for LDD Rd, Y+0"),
    op!(0xfe0f, 0x9009, 1, "1001 000d dddd 1001", Avr2, "ld_5", "ld", "Rd, Y+", "Load Indirect and Post-Increment", "Rd <-- (Y) Y <-- Y+1", "None", ["2", "2", "2", "2/3"], ""),
    op!(0xfe0f, 0x900a, 1, "1001 000d dddd 1010", Avr2, "ld_6", "ld", "Rd, -Y", "Load Indirect and Pre-Decrement", "Y <-- Y-1 Rd <-- (Y)", "None", ["2", "3", "2", "2/3"], ""),
    op!(0xd208, 0x8008, 1, "10q0 qq0d dddd 1qqq", Avr2nRc, "ldd_1", "ldd", "Rd, Y+q", "Load Indirect with Displacement", "Rd <-- (Y+q)", "None", ["2", "3", "2", "n/a"], ""),
    op!(0xfe0f, 0x8000, 1, "1000 000d dddd 0000", Avr1, "ld_7", "ld", "Rd, Z", "Load Indirect", "Rd <-- (Z)", "None", ["2", "2", "2", "1/2"], "alias for LDD Rd,Z+0"),
    op!(0xfe0f, 0x9001, 1, "1001 000d dddd 0001", Avr1, "ld_8", "ld", "Rd, Z+", "Load Indirect and Post-Increment", "Rd <-- (Z), Z <-- Z+1", "None", ["2", "2", "2", "2/3"], ""),
    op!(0xfe0f, 0x9002, 1, "1001 000d dddd 0010", Avr1, "ld_9", "ld", "Rd, -Z", "Load Indirect and Pre-Decrement", "Z <-- Z-1, Rd <-- (Z)", "None", ["2", "3", "2", "2/3"], ""),
    op!(0xd208, 0x8000, 1, "10q0 qq0d dddd 0qqq", Avr2nRc, "ldd_2", "ldd", "Rd, Z+q", "Load Indirect with Displacement", "Rd <-- (Z+q)", "None", ["2", "3", "2", "n/a"], ""),
    op!(0xfe0f, 0x9200, 2, "1001 001d dddd 0000  kkkk kkkk kkkk kkkk", Avr2nRc, "sts", "sts", "k, Rr", "Store Direct to Data Space", "(k) <-- Rd", "None", ["2", "2", "2", "1"], ""),
    op!(0xf800, 0xa800, 1, "1010 1kkk dddd kkkk", AvrRc, "sts_rc", "sts", "k, Rr", "Store Direct to Data Space", "(k) <-- Rd", "None", ["n/a", "n/a", "n/a", "1"], "AVRrc only (TPI parts)"),
    op!(0xfe0f, 0x920c, 1, "1001 001r rrrr 1100", Avr2, "st_1", "st", "X, Rr", "Store Indirect", "(X) <-- Rr", "None", ["2", "1", "1", "1"], ""),
    op!(0xfe0f, 0x920d, 1, "1001 001r rrrr 1101", Avr2, "st_2", "st", "X+, Rr", "Store Indirect and Post-Increment", "(X) <-- Rr, X <-- X+1", "None", ["2", "1", "1", "1"], ""),
    op!(0xfe0f, 0x920e, 1, "1001 001r rrrr 1110", Avr2, "st_3", "st", "-X, Rr", "Store Indirect and Pre-Decrement", "X <-- X-1, (X) <-- Rr", "None", ["2", "2", "1", "1"], ""),
    op!(0xfe0f, 0x8208, 1, "1000 001r rrrr 1000", Avr2, "st_4", "st", "Y, Rr", "Store Indirect", "(Y) <-- Rr", "None", ["2", "1", "1", "1"], "alias for STD Y+0, Rr"),
    op!(0xfe0f, 0x9209, 1, "1001 001r rrrr 1001", Avr2, "st_5", "st", "Y+, Rr", "Store Indirect and Post-Increment", "(Y) <-- Rr, Y <-- Y+1", "None", ["2", "1", "1", "1"], ""),
    op!(0xfe0f, 0x920a, 1, "1001 001r rrrr 1010", Avr2, "st_6", "st", "-Y, Rr", "Store Indirect and Pre-Decrement", "Y <-- Y-1, (Y) <-- Rr", "None", ["2", "2", "1", "1"], ""),
    op!(0xd208, 0x8208, 1, "10q0 qq1r rrrr 1qqq", Avr2nRc, "std_1", "std", "Y+q, Rr", "Store Indirect with Displacement", "(Y+q) <-- Rr", "None", ["2", "2", "1", "n/a"], ""),
    op!(0xfe0f, 0x8200, 1, "1000 001r rrrr 0000", Avr1, "st_7", "st", "Z, Rr", "Store Indirect", "(Z) <-- Rr", "None", ["2", "1", "1", "1"], "alias for STD Z+0, Rr"),
    op!(0xfe0f, 0x9201, 1, "1001 001r rrrr 0001", Avr1, "st_8", "st", "Z+, Rr", "Store Indirect and Post-Increment", "(Z) <-- Rr Z <-- Z+1", "None", ["2", "1", "1", "1"], ""),
    op!(0xfe0f, 0x9202, 1, "1001 001r rrrr 0010", Avr1, "st_9", "st", "-Z, Rr", "Store Indirect and Pre-Decrement", "Z <-- Z-1", "None", ["2", "2", "1", "1"], ""),
    op!(0xd208, 0x8200, 1, "10q0 qq1r rrrr 0qqq", Avr2nRc, "std_2", "std", "Z+q, Rr", "Store Indirect with Displacement", "(Z+q) <-- Rr", "None", ["2", "2", "1", "n/a"], ""),
    op!(0xffff, 0x95c8, 1, "1001 0101 1100 1000", Avr1nRc, "lpm_1", "lpm", "-", "Load Program Memory", "R0 <-- (Z)", "None", ["3", "3", "3", "n/a"], ""),
    op!(0xfe0f, 0x9004, 1, "1001 000d dddd 0100", Avr25, "lpm_2", "lpm", "Rd, Z", "Load Program Memory", "Rd <-- (Z)", "None", ["3", "3", "3", "n/a"], ""),
    op!(0xfe0f, 0x9005, 1, "1001 000d dddd 0101", Avr25, "lpm_3", "lpm", "Rd, Z+", "Load Program Memory and Post- Increment", "Rd <-- (Z), Z <-- Z+1", "None", ["3", "3", "3", "n/a"], ""),
    op!(0xffff, 0x95d8, 1, "1001 0101 1101 1000", AvrL, "elpm_1", "elpm", "R0, Z", "Extended Load Program Memory", "R0 <-- (RAMPZ:Z)", "None", ["3", "3", "3", "n/a"], ""),
    op!(0xfe0f, 0x9006, 1, "1001 000d dddd 0110", AvrL, "elpm_2", "elpm", "Rd, Z", "Extended Load Program Memory", "Rd <-- (RAMPZ:Z)", "None", ["3", "3", "3", "n/a"], ""),
    op!(0xfe0f, 0x9007, 1, "1001 000d dddd 0111", AvrL, "elpm_3", "elpm", "Rd, Z+", "Extended Load Program Memory and Post-Increment", "Rd <-- (RAMPZ:Z), Z <-- Z+1", "None", ["3", "3", "3", "n/a"], ""),
    op!(0xffff, 0x95e8, 1, "1001 0101 1110 1000", Avr25, "spm", "spm", "Z", "Store Program Memory", "(RAMPZ:Z) <-- R1:R0", "None", ["-", "-", "-", "-"], ""),
    op!(0xffff, 0x95f8, 1, "1001 0101 1111 1000", AvrXtm, "spm_zz", "spm", "Z+", "Store Program Memory and Post- Increment by 2", "(RAMPZ:Z) <-- R1:R0, Z <-- Z+2", "None", ["n/a", "-", "-", "n/a"], ""),
    op!(0xf800, 0xb000, 1, "1011 0AAd dddd AAAA", Avr1, "in", "in", "Rd, A", "In From I/O Location", "Rd <-- I/O(A)", "None", ["1", "1", "1", "1"], ""),
    op!(0xf800, 0xb800, 1, "1011 1AAr rrrr AAAA", Avr1, "out", "out", "A, Rr", "Out To I/O Location", "I/O(A) <-- Rr", "None", ["1", "1", "1", "1"], ""),
    op!(0xfe0f, 0x920f, 1, "1001 001d dddd 1111", Avr2, "push", "push", "Rr", "Push Register on Stack", "STACK <-- Rr", "None", ["2", "1", "1", "1"], ""),
    op!(0xfe0f, 0x900f, 1, "1001 000d dddd 1111", Avr2, "pop", "pop", "Rd", "Pop Register from Stack", "Rd <-- STACK", "None", ["2", "2", "2", "3"], ""),
    op!(0xfe0f, 0x9204, 1, "1001 001r rrrr 0100", AvrXm, "xch", "xch", "Z, Rd", "Exchange", "(Z) <-- Rd, Rd <-- (Z)", "None", ["n/a", "1", "n/a", "n/a"], ""),
    op!(0xfe0f, 0x9205, 1, "1001 001r rrrr 0101", AvrXm, "las", "las", "Z, Rd", "Load and Set", "(Z) <-- Rd|(Z), Rd <-- (Z)", "None", ["n/a", "1", "n/a", "n/a"], ""),
    op!(0xfe0f, 0x9206, 1, "1001 001r rrrr 0110", AvrXm, "lac", "lac", "Z, Rd", "Load and Clear", "(Z) <-- ($FF - Rd) & (Z), Rd <-- (Z)", "None", ["n/a", "1", "n/a", "n/a"], ""),
    op!(0xfe0f, 0x9207, 1, "1001 001r rrrr 0111", AvrXm, "lat", "lat", "Z, Rd", "Load and Toggle", "(Z) <-- Rd^(Z), Rd <-- (Z)", "None", ["n/a", "1", "n/a", "n/a"], ""),

    // Bit and bit test
    op!(0xfc00, 0x0c00, 1, "0000 11dd dddd dddd", Avr1, "lsl", "lsl", "Rd", "Logical Shift Left", "C <-- Rd(7) <-- Rd(6) ... Rd(1) <-- Rd(0) <-- 0", "Z,C,N,V,H", ["1", "1", "1", "1"], "alias for ADD Rd, Rd"),
    op!(0xfe0f, 0x9406, 1, "1001 010d dddd 0110", Avr1, "lsr", "lsr", "Rd", "Logical Shift Right", "0 --> Rd(7) --> Rd(6) ... Rd(1) --> Rd(0) --> C", "Z,C,N,V", ["1", "1", "1", "1"], ""),
    op!(0xfc00, 0x1c00, 1, "0001 11dd dddd dddd", Avr1, "rol", "rol", "Rd", "Rotate Left Through Carry", "C <-- Rd(7) <-- Rd(6) ... Rd(1) <-- Rd(0) <-- C", "Z,C,N,V,H", ["1", "1", "1", "1"], "alias for ADC Rd, Rd"),
    op!(0xfe0f, 0x9407, 1, "1001 010d dddd 0111", Avr1, "ror", "ror", "Rd", "Rotate Right Through Carry", "C --> Rd(7) --> Rd(6) ... Rd(1) --> Rd(0) --> C", "Z,C,N,V", ["1", "1", "1", "1"], ""),
    op!(0xfe0f, 0x9405, 1, "1001 010d dddd 0101", Avr1, "asr", "asr", "Rd", "Arithmetic Shift Right", "Rd(7) --> Rd(7) --> Rd(6) ... Rd(1) --> Rd(0) --> C", "Z,C,N,V", ["1", "1", "1", "1"], ""),
    op!(0xfe0f, 0x9402, 1, "1001 010d dddd 0010", Avr1, "swap", "swap", "Rd", "Swap Nibbles", "Rd(3..0) <--> Rd(7..4)", "None", ["1", "1", "1", "1"], ""),
    op!(0xff8f, 0x9408, 1, "1001 0100 0sss 1000", Avr1, "bset", "bset", "s", "Flag Set", "SREG(s) <-- 1", "SREG(s)", ["1", "1", "1", "1"], ""),
    op!(0xff8f, 0x9488, 1, "1001 0100 1sss 1000", Avr1, "bclr", "bclr", "s", "Flag Clear", "SREG(s) <-- 0", "SREG(s)", ["1", "1", "1", "1"], "s = 0-7 = C,Z,N,V,S,H,T,I"),
    op!(0xff00, 0x9a00, 1, "1001 1010 AAAA Abbb", Avr1, "sbi", "sbi", "A, b", "Set Bit in I/O Register", "I/O(A,b) <-- 1", "None", ["2", "1", "1", "1"], ""),
    op!(0xff00, 0x9800, 1, "1001 1000 AAAA Abbb", Avr1, "cbi", "cbi", "A, b", "Clear Bit in I/O Register", "I/O(A,b) <-- 0", "None", ["2", "1", "1", "1"], ""),
    op!(0xfe08, 0xfa00, 1, "1111 101d dddd 0bbb", Avr1, "bst", "bst", "Rr, b", "Bit Store from Register to T", "T <-- Rr(b)", "T", ["1", "1", "1", "1"], ""),
    op!(0xfe08, 0xf800, 1, "1111 100d dddd 0bbb", Avr1, "bld", "bld", "Rd, b", "Bit load from T to Register", "Rd(b) <-- T", "None", ["1", "1", "1", "1"], ""),
    op!(0xffff, 0x9408, 1, "1001 0100 0000 1000", Avr1, "sec", "sec", "-", "Set Carry", "C <-- 1", "C", ["1", "1", "1", "1"], "alias for BSET 0"),
    op!(0xffff, 0x9488, 1, "1001 0100 1000 1000", Avr1, "clc", "clc", "-", "Clear Carry", "C <-- 0", "C", ["1", "1", "1", "1"], "alias for BCLR 0"),
    op!(0xffff, 0x9428, 1, "1001 0100 0010 1000", Avr1, "sen", "sen", "-", "Set Negative Flag", "N <-- 1", "N", ["1", "1", "1", "1"], "alias for BSET 2"),
    op!(0xffff, 0x94a8, 1, "1001 0100 1010 1000", Avr1, "cln", "cln", "-", "Clear Negative Flag", "N <-- 0", "N", ["1", "1", "1", "1"], "alias for BCLR 2"),
    op!(0xffff, 0x9418, 1, "1001 0100 0001 1000", Avr1, "sez", "sez", "-", "Set Zero Flag", "Z <-- 1", "Z", ["1", "1", "1", "1"], "alias for BSET 1"),
    op!(0xffff, 0x9498, 1, "1001 0100 1001 1000", Avr1, "clz", "clz", "-", "Clear Zero Flag", "Z <-- 0", "Z", ["1", "1", "1", "1"], "alias for BCLR 1"),
    op!(0xffff, 0x9478, 1, "1001 0100 0111 1000", Avr1, "sei", "sei", "-", "Global Interrupt Enable", "I <-- 1", "I", ["1", "1", "1", "1"], "alias for BSET 7"),
    op!(0xffff, 0x94f8, 1, "1001 0100 1111 1000", Avr1, "cli", "cli", "-", "Global Interrupt Disable", "I <-- 0", "I", ["1", "1", "1", "1"], "alias for BCLR 7"),
    op!(0xffff, 0x9448, 1, "1001 0100 0100 1000", Avr1, "ses", "ses", "-", "Set Signed Test Flag", "S <-- 1", "S", ["1", "1", "1", "1"], "alias for BSET 4"),
    op!(0xffff, 0x94c8, 1, "1001 0100 1100 1000", Avr1, "cls", "cls", "-", "Clear Signed Test Flag", "S <-- 0", "S", ["1", "1", "1", "1"], "alias for BCLR 4"),
    op!(0xffff, 0x9438, 1, "1001 0100 0011 1000", Avr1, "sev", "sev", "-", "Set Two's Complement Overflow", "V <-- 1", "V", ["1", "1", "1", "1"], "alias for BSET 3"),
    op!(0xffff, 0x94b8, 1, "1001 0100 1011 1000", Avr1, "clv", "clv", "-", "Clear Two's Complement Overflow", "V <-- 0", "V", ["1", "1", "1", "1"], "alias for BCLR 3"),
    op!(0xffff, 0x9468, 1, "1001 0100 0110 1000", Avr1, "set", "set", "-", "Set T in SREG", "T <-- 1", "T", ["1", "1", "1", "1"], "alias for BSET 6"),
    op!(0xffff, 0x94e8, 1, "1001 0100 1110 1000", Avr1, "clt", "clt", "-", "Clear T in SREG", "T <-- 0", "T", ["1", "1", "1", "1"], "alias for BCLR 6"),
    op!(0xffff, 0x9458, 1, "1001 0100 0101 1000", Avr1, "seh", "seh", "-", "Set Half Carry Flag in SREG", "H <-- 1", "H", ["1", "1", "1", "1"], "alias for BSET 5"),
    op!(0xffff, 0x94d8, 1, "1001 0100 1101 1000", Avr1, "clh", "clh", "-", "Clear Half Carry Flag in SREG", "H <-- 0", "H", ["1", "1", "1", "1"], "alias for BCLR 5"),

    // MCU control
    op!(0xffff, 0x9598, 1, "1001 0101 1001 1000", Avr1, "break", "break", "-", "Break", "(cf documentation)", "None", ["-", "-", "-", "-"], "not available on all parts"),
    op!(0xffff, 0x0000, 1, "0000 0000 0000 0000", Avr1, "nop", "nop", "-", "No Operation", "-", "None", ["1", "1", "1", "1"], ""),
    op!(0xffff, 0x9588, 1, "1001 0101 1000 1000", Avr1, "sleep", "sleep", "-", "Sleep", "(cf documentation)", "None", ["-", "-", "-", "-"], ""),
    op!(0xffff, 0x95a8, 1, "1001 0101 1010 1000", Avr1, "wdr", "wdr", "-", "Watchdog Reset", "(cf documentation)", "None", ["1", "1", "1", "1"], ""),

    // Unallocated encodings
    op!(0xff00, 0x0000, 1, "0000 0000 xxxx xxxx", Avr1, "x_nop_1", "nop", "", "", "", "", ["", "", "", ""], "xxxx xxxx != 0000 0000"),
    op!(0xfe0f, 0x9003, 1, "1001 000x xxxx 0011", Avr1, "x_nop_2", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xfe0f, 0x9008, 1, "1001 000x xxxx 1000", Avr1, "x_nop_3", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xfe0f, 0x900b, 1, "1001 000x xxxx 1011", Avr1, "x_nop_4", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xfe0f, 0x9203, 1, "1001 001x xxxx 0011", Avr1, "x_nop_5", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xfe0f, 0x9208, 1, "1001 001x xxxx 1000", Avr1, "x_nop_6", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xfe0f, 0x920b, 1, "1001 001x xxxx 1011", Avr1, "x_nop_7", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xff1f, 0x9509, 1, "1001 0101 xxx0 1001", Avr2, "x_icall", "icall", "", "", "", "", ["", "", "", ""], "xxx != 000"),
    op!(0xff1f, 0x9519, 1, "1001 0101 xxx1 1001", AvrXl, "x_eicall", "eicall", "", "", "", "", ["", "", "", ""], "xxx != 000"),
    op!(0xff9f, 0x9508, 1, "1001 0101 0xx0 1000", Avr1, "x_ret", "ret", "", "", "", "", ["", "", "", ""], "xx != 00"),
    op!(0xff9f, 0x9518, 1, "1001 0101 0xx1 1000", Avr1, "x_reti", "reti", "", "", "", "", ["", "", "", ""], "xx != 00"),
    op!(0xffff, 0x95b8, 1, "1001 0101 1011 1000", Avr1, "x_nop_8", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xfe0f, 0x9404, 1, "1001 010x xxxx 0100", Avr1, "x_nop_9", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xff0f, 0x950b, 1, "1001 0101 xxxx 1011", Avr1, "x_nop_a", "nop", "", "", "", "", ["", "", "", ""], ""),
    op!(0xff1f, 0x9409, 1, "1001 0100 xxx0 1001", Avr2, "x_ijmp", "ijmp", "", "", "", "", ["", "", "", ""], "xxx != 000"),
    op!(0xff1f, 0x9419, 1, "1001 0100 xxx1 1001", AvrXl, "x_eijmp", "eijmp", "", "", "", "", ["", "", "", ""], "xxx != 000"),
    op!(0xfe08, 0xf808, 1, "1111 100x xxxx 1xxx", Avr1, "x_bld", "bld", "Rd, b", "", "", "", ["", "", "", ""], ""),
    op!(0xfe08, 0xfa08, 1, "1111 101x xxxx 1xxx", Avr1, "x_bst", "bst", "Rd, b", "", "", "", ["", "", "", ""], ""),
    op!(0xfe08, 0xfc08, 1, "1111 110x xxxx 1xxx", Avr1, "x_sbrc", "sbrc", "Rr, b", "", "", "", ["", "", "", ""], ""),
    op!(0xfe08, 0xfe08, 1, "1111 111x xxxx 1xxx", Avr1, "x_sbrs", "sbrs", "Rr, b", "", "", "", ["", "", "", ""], ""),
];
