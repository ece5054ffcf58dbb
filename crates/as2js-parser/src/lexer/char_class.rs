use bitflags::bitflags;

bitflags! {
    /// Lexical class of a code point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CharClass: u8 {
        const INVALID = 1 << 0;
        const LINE_TERMINATOR = 1 << 1;
        const WHITE_SPACE = 1 << 2;
        const DIGIT = 1 << 3;
        const HEX_DIGIT = 1 << 4;
        const LETTER = 1 << 5;
        const PUNCTUATION = 1 << 6;
    }
}

/// Classify a code point.
///
/// Non-ASCII code points are letters only when `IDENTIFIER_RANGES` lists
/// them; everything else outside the space and line terminator sets is
/// punctuation.
pub fn char_class(c: u32) -> CharClass {
    match c {
        0 => CharClass::INVALID,

        // NEL (U+0085) is not a line terminator in ECMAScript 5
        0x0A | 0x0D | 0x2028 | 0x2029 => CharClass::LINE_TERMINATOR,

        0x09 | 0x0B | 0x0C | 0x20 | 0xA0 | 0x1680 | 0x180E | 0x2000..=0x200A | 0x202F
        | 0x205F | 0x3000 | 0xFEFF => CharClass::WHITE_SPACE,

        0x30..=0x39 => CharClass::DIGIT | CharClass::HEX_DIGIT,

        0x41..=0x46 | 0x61..=0x66 => CharClass::LETTER | CharClass::HEX_DIGIT,

        0x47..=0x5A | 0x67..=0x7A | 0x24 | 0x5F => CharClass::LETTER,

        0xD800..=0xDFFF => CharClass::INVALID,
        _ if c & 0xFFFF >= 0xFFFE || c > 0x10FFFF => CharClass::INVALID,

        _ if c < 0x7F => CharClass::PUNCTUATION,

        _ if is_identifier_character(c) => CharClass::LETTER,
        _ => CharClass::PUNCTUATION,
    }
}

fn is_identifier_character(c: u32) -> bool {
    IDENTIFIER_RANGES
        .binary_search_by(|&(min, max)| {
            if max < c {
                std::cmp::Ordering::Less
            } else if min > c {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Inclusive ranges of non-ASCII code points accepted in identifiers
/// (ECMAScript 5 letters, marks, digits and connectors), sorted.
static IDENTIFIER_RANGES: &[(u32, u32)] = &[
    (0x000AA, 0x000AA), (0x000B5, 0x000B5), (0x000BA, 0x000BA), (0x000C0, 0x000D6),
    (0x000D8, 0x000F6), (0x000F8, 0x002C1), (0x002C6, 0x002D1), (0x002E0, 0x002E4),
    (0x002EC, 0x002EC), (0x002EE, 0x002EE), (0x00300, 0x00374), (0x00376, 0x00377),
    (0x0037A, 0x0037D), (0x00386, 0x00386), (0x00388, 0x0038A), (0x0038C, 0x0038C),
    (0x0038E, 0x003A1), (0x003A3, 0x003F5), (0x003F7, 0x00481), (0x00483, 0x00487),
    (0x0048A, 0x00527), (0x00531, 0x00556), (0x00559, 0x00559), (0x00561, 0x00587),
    (0x00591, 0x005BD), (0x005BF, 0x005BF), (0x005C1, 0x005C2), (0x005C4, 0x005C5),
    (0x005C7, 0x005C7), (0x005D0, 0x005EA), (0x005F0, 0x005F2), (0x00610, 0x0061A),
    (0x00620, 0x00669), (0x0066E, 0x006D3), (0x006D5, 0x006DC), (0x006DF, 0x006E8),
    (0x006EA, 0x006FC), (0x006FF, 0x006FF), (0x00710, 0x0074A), (0x0074D, 0x007B1),
    (0x007C0, 0x007F5), (0x007FA, 0x007FA), (0x00800, 0x0082D), (0x00840, 0x0085B),
    (0x008A0, 0x008A0), (0x008A2, 0x008B2), (0x008E4, 0x008FF), (0x00900, 0x00963),
    (0x00966, 0x0096F), (0x00971, 0x00977), (0x00979, 0x0097F), (0x00981, 0x00983),
    (0x00985, 0x0098C), (0x0098F, 0x00990), (0x00993, 0x009A8), (0x009AA, 0x009B0),
    (0x009B2, 0x009B2), (0x009B6, 0x009B9), (0x009BC, 0x009C4), (0x009C7, 0x009C8),
    (0x009CB, 0x009CE), (0x009D7, 0x009D7), (0x009DC, 0x009DD), (0x009DF, 0x009E3),
    (0x009E6, 0x009F1), (0x00A01, 0x00A03), (0x00A05, 0x00A0A), (0x00A0F, 0x00A10),
    (0x00A13, 0x00A28), (0x00A2A, 0x00A30), (0x00A32, 0x00A33), (0x00A35, 0x00A36),
    (0x00A38, 0x00A39), (0x00A3C, 0x00A3C), (0x00A3E, 0x00A42), (0x00A47, 0x00A48),
    (0x00A4B, 0x00A4D), (0x00A51, 0x00A51), (0x00A59, 0x00A5C), (0x00A5E, 0x00A5E),
    (0x00A66, 0x00A75), (0x00A81, 0x00A83), (0x00A85, 0x00A8D), (0x00A8F, 0x00A91),
    (0x00A93, 0x00AA8), (0x00AAA, 0x00AB0), (0x00AB2, 0x00AB3), (0x00AB5, 0x00AB9),
    (0x00ABC, 0x00AC5), (0x00AC7, 0x00AC9), (0x00ACB, 0x00ACD), (0x00AD0, 0x00AD0),
    (0x00AE0, 0x00AE3), (0x00AE6, 0x00AEF), (0x00B01, 0x00B03), (0x00B05, 0x00B0C),
    (0x00B0F, 0x00B10), (0x00B13, 0x00B28), (0x00B2A, 0x00B30), (0x00B32, 0x00B33),
    (0x00B35, 0x00B39), (0x00B3C, 0x00B44), (0x00B47, 0x00B48), (0x00B4B, 0x00B4D),
    (0x00B56, 0x00B57), (0x00B5C, 0x00B5D), (0x00B5F, 0x00B63), (0x00B66, 0x00B6F),
    (0x00B71, 0x00B71), (0x00B82, 0x00B83), (0x00B85, 0x00B8A), (0x00B8E, 0x00B90),
    (0x00B92, 0x00B95), (0x00B99, 0x00B9A), (0x00B9C, 0x00B9C), (0x00B9E, 0x00B9F),
    (0x00BA3, 0x00BA4), (0x00BA8, 0x00BAA), (0x00BAE, 0x00BB9), (0x00BBE, 0x00BC2),
    (0x00BC6, 0x00BC8), (0x00BCA, 0x00BCD), (0x00BD0, 0x00BD0), (0x00BD7, 0x00BD7),
    (0x00BE6, 0x00BEF), (0x00C01, 0x00C03), (0x00C05, 0x00C0C), (0x00C0E, 0x00C10),
    (0x00C12, 0x00C28), (0x00C2A, 0x00C33), (0x00C35, 0x00C39), (0x00C3D, 0x00C44),
    (0x00C46, 0x00C48), (0x00C4A, 0x00C4D), (0x00C55, 0x00C56), (0x00C58, 0x00C59),
    (0x00C60, 0x00C63), (0x00C66, 0x00C6F), (0x00C82, 0x00C83), (0x00C85, 0x00C8C),
    (0x00C8E, 0x00C90), (0x00C92, 0x00CA8), (0x00CAA, 0x00CB3), (0x00CB5, 0x00CB9),
    (0x00CBC, 0x00CC4), (0x00CC6, 0x00CC8), (0x00CCA, 0x00CCD), (0x00CD5, 0x00CD6),
    (0x00CDE, 0x00CDE), (0x00CE0, 0x00CE3), (0x00CE6, 0x00CEF), (0x00CF1, 0x00CF2),
    (0x00D02, 0x00D03), (0x00D05, 0x00D0C), (0x00D0E, 0x00D10), (0x00D12, 0x00D3A),
    (0x00D3D, 0x00D44), (0x00D46, 0x00D48), (0x00D4A, 0x00D4E), (0x00D57, 0x00D57),
    (0x00D60, 0x00D63), (0x00D66, 0x00D6F), (0x00D7A, 0x00D7F), (0x00D82, 0x00D83),
    (0x00D85, 0x00D96), (0x00D9A, 0x00DB1), (0x00DB3, 0x00DBB), (0x00DBD, 0x00DBD),
    (0x00DC0, 0x00DC6), (0x00DCA, 0x00DCA), (0x00DCF, 0x00DD4), (0x00DD6, 0x00DD6),
    (0x00DD8, 0x00DDF), (0x00DF2, 0x00DF3), (0x00E01, 0x00E3A), (0x00E40, 0x00E4E),
    (0x00E50, 0x00E59), (0x00E81, 0x00E82), (0x00E84, 0x00E84), (0x00E87, 0x00E88),
    (0x00E8A, 0x00E8A), (0x00E8D, 0x00E8D), (0x00E94, 0x00E97), (0x00E99, 0x00E9F),
    (0x00EA1, 0x00EA3), (0x00EA5, 0x00EA5), (0x00EA7, 0x00EA7), (0x00EAA, 0x00EAB),
    (0x00EAD, 0x00EB9), (0x00EBB, 0x00EBD), (0x00EC0, 0x00EC4), (0x00EC6, 0x00EC6),
    (0x00EC8, 0x00ECD), (0x00ED0, 0x00ED9), (0x00EDC, 0x00EDF), (0x00F00, 0x00F00),
    (0x00F18, 0x00F19), (0x00F20, 0x00F29), (0x00F35, 0x00F35), (0x00F37, 0x00F37),
    (0x00F39, 0x00F39), (0x00F3E, 0x00F47), (0x00F49, 0x00F6C), (0x00F71, 0x00F84),
    (0x00F86, 0x00F97), (0x00F99, 0x00FBC), (0x00FC6, 0x00FC6), (0x01000, 0x01049),
    (0x01050, 0x0109D), (0x010A0, 0x010C5), (0x010C7, 0x010C7), (0x010CD, 0x010CD),
    (0x010D0, 0x010FA), (0x010FC, 0x01248), (0x0124A, 0x0124D), (0x01250, 0x01256),
    (0x01258, 0x01258), (0x0125A, 0x0125D), (0x01260, 0x01288), (0x0128A, 0x0128D),
    (0x01290, 0x012B0), (0x012B2, 0x012B5), (0x012B8, 0x012BE), (0x012C0, 0x012C0),
    (0x012C2, 0x012C5), (0x012C8, 0x012D6), (0x012D8, 0x01310), (0x01312, 0x01315),
    (0x01318, 0x0135A), (0x0135D, 0x0135F), (0x01380, 0x0138F), (0x013A0, 0x013F4),
    (0x01401, 0x0166C), (0x0166F, 0x0167F), (0x01681, 0x0169A), (0x016A0, 0x016EA),
    (0x016EE, 0x016F0), (0x01700, 0x0170C), (0x0170E, 0x01714), (0x01720, 0x01734),
    (0x01740, 0x01753), (0x01760, 0x0176C), (0x0176E, 0x01770), (0x01772, 0x01773),
    (0x01780, 0x017D3), (0x017D7, 0x017D7), (0x017DC, 0x017DD), (0x017E0, 0x017E9),
    (0x0180B, 0x0180D), (0x01810, 0x01819), (0x01820, 0x01877), (0x01880, 0x018AA),
    (0x018B0, 0x018F5), (0x01900, 0x0191C), (0x01920, 0x0192B), (0x01930, 0x0193B),
    (0x01946, 0x0196D), (0x01970, 0x01974), (0x01980, 0x019AB), (0x019B0, 0x019C9),
    (0x019D0, 0x019D9), (0x01A00, 0x01A1B), (0x01A20, 0x01A5E), (0x01A60, 0x01A7C),
    (0x01A7F, 0x01A89), (0x01A90, 0x01A99), (0x01AA7, 0x01AA7), (0x01B00, 0x01B4B),
    (0x01B50, 0x01B59), (0x01B6B, 0x01B73), (0x01B80, 0x01BF3), (0x01C00, 0x01C37),
    (0x01C40, 0x01C49), (0x01C4D, 0x01C7D), (0x01CD0, 0x01CD2), (0x01CD4, 0x01CF6),
    (0x01D00, 0x01DE6), (0x01DFC, 0x01F15), (0x01F18, 0x01F1D), (0x01F20, 0x01F45),
    (0x01F48, 0x01F4D), (0x01F50, 0x01F57), (0x01F59, 0x01F59), (0x01F5B, 0x01F5B),
    (0x01F5D, 0x01F5D), (0x01F5F, 0x01F7D), (0x01F80, 0x01FB4), (0x01FB6, 0x01FBC),
    (0x01FBE, 0x01FBE), (0x01FC2, 0x01FC4), (0x01FC6, 0x01FCC), (0x01FD0, 0x01FD3),
    (0x01FD6, 0x01FDB), (0x01FE0, 0x01FEC), (0x01FF2, 0x01FF4), (0x01FF6, 0x01FFC),
    (0x0200C, 0x0200D), (0x0203F, 0x02040), (0x02054, 0x02054), (0x02071, 0x02071),
    (0x0207F, 0x0207F), (0x02090, 0x0209C), (0x020D0, 0x020DC), (0x020E1, 0x020E1),
    (0x020E5, 0x020F0), (0x02102, 0x02102), (0x02107, 0x02107), (0x0210A, 0x02113),
    (0x02115, 0x02115), (0x02119, 0x0211D), (0x02124, 0x02124), (0x02126, 0x02126),
    (0x02128, 0x02128), (0x0212A, 0x0212D), (0x0212F, 0x02139), (0x0213C, 0x0213F),
    (0x02145, 0x02149), (0x0214E, 0x0214E), (0x02160, 0x02188), (0x02C00, 0x02C2E),
    (0x02C30, 0x02C5E), (0x02C60, 0x02CE4), (0x02CEB, 0x02CF3), (0x02D00, 0x02D25),
    (0x02D27, 0x02D27), (0x02D2D, 0x02D2D), (0x02D30, 0x02D67), (0x02D6F, 0x02D6F),
    (0x02D7F, 0x02D96), (0x02DA0, 0x02DA6), (0x02DA8, 0x02DAE), (0x02DB0, 0x02DB6),
    (0x02DB8, 0x02DBE), (0x02DC0, 0x02DC6), (0x02DC8, 0x02DCE), (0x02DD0, 0x02DD6),
    (0x02DD8, 0x02DDE), (0x02DE0, 0x02DFF), (0x02E2F, 0x02E2F), (0x03005, 0x03007),
    (0x03021, 0x0302F), (0x03031, 0x03035), (0x03038, 0x0303C), (0x03041, 0x03096),
    (0x03099, 0x0309A), (0x0309D, 0x0309F), (0x030A1, 0x030FA), (0x030FC, 0x030FF),
    (0x03105, 0x0312D), (0x03131, 0x0318E), (0x031A0, 0x031BA), (0x031F0, 0x031FF),
    (0x03400, 0x04DB5), (0x04E00, 0x09FCC), (0x0A000, 0x0A48C), (0x0A4D0, 0x0A4FD),
    (0x0A500, 0x0A60C), (0x0A610, 0x0A62B), (0x0A640, 0x0A66F), (0x0A674, 0x0A67D),
    (0x0A67F, 0x0A697), (0x0A69F, 0x0A6F1), (0x0A717, 0x0A71F), (0x0A722, 0x0A788),
    (0x0A78B, 0x0A78E), (0x0A790, 0x0A79F), (0x0A7A0, 0x0A7B1), (0x0A7F8, 0x0A827),
    (0x0A840, 0x0A873), (0x0A880, 0x0A8C4), (0x0A8D0, 0x0A8D9), (0x0A8E0, 0x0A8F7),
    (0x0A8FB, 0x0A8FB), (0x0A900, 0x0A92D), (0x0A930, 0x0A953), (0x0A960, 0x0A97C),
    (0x0A980, 0x0A9C0), (0x0A9CF, 0x0A9D9), (0x0AA00, 0x0AA36), (0x0AA40, 0x0AA4D),
    (0x0AA50, 0x0AA59), (0x0AA60, 0x0AA76), (0x0AA7A, 0x0AA7B), (0x0AA80, 0x0AAC2),
    (0x0AADB, 0x0AADD), (0x0AAE0, 0x0AAEF), (0x0AAF2, 0x0AAF6), (0x0AB01, 0x0AB06),
    (0x0AB09, 0x0AB0E), (0x0AB11, 0x0AB16), (0x0AB20, 0x0AB26), (0x0AB28, 0x0AB2E),
    (0x0ABC0, 0x0ABEA), (0x0ABEC, 0x0ABED), (0x0ABF0, 0x0ABF9), (0x0AC00, 0x0D7A3),
    (0x0D7B0, 0x0D7C6), (0x0D7CB, 0x0D7FB), (0x0F900, 0x0FA6D), (0x0FA70, 0x0FAD9),
    (0x0FB00, 0x0FB06), (0x0FB13, 0x0FB17), (0x0FB1D, 0x0FB28), (0x0FB2A, 0x0FB36),
    (0x0FB38, 0x0FB3C), (0x0FB3E, 0x0FB3E), (0x0FB40, 0x0FB41), (0x0FB43, 0x0FB44),
    (0x0FB46, 0x0FBB1), (0x0FBD3, 0x0FD3D), (0x0FD50, 0x0FD8F), (0x0FD92, 0x0FDC7),
    (0x0FDF0, 0x0FDFB), (0x0FE00, 0x0FE0F), (0x0FE20, 0x0FE26), (0x0FE33, 0x0FE34),
    (0x0FE4D, 0x0FE4F), (0x0FE70, 0x0FE74), (0x0FE76, 0x0FEFC), (0x0FF10, 0x0FF19),
    (0x0FF21, 0x0FF3A), (0x0FF3F, 0x0FF3F), (0x0FF41, 0x0FF5A), (0x0FF66, 0x0FFBE),
    (0x0FFC2, 0x0FFC7), (0x0FFCA, 0x0FFCF), (0x0FFD2, 0x0FFD7), (0x0FFDA, 0x0FFDC),
    (0x10000, 0x1000B), (0x1000D, 0x10026), (0x10028, 0x1003A), (0x1003C, 0x1003D),
    (0x1003F, 0x1004D), (0x10050, 0x1005D), (0x10080, 0x100FA), (0x10140, 0x10174),
    (0x101FD, 0x101FD), (0x10280, 0x1029C), (0x102A0, 0x102D0), (0x10300, 0x1031E),
    (0x10330, 0x1034A), (0x10380, 0x1039D), (0x103A0, 0x103C3), (0x103C8, 0x103CF),
    (0x103D1, 0x103D5), (0x10400, 0x1049D), (0x104A0, 0x104A9), (0x10800, 0x10805),
    (0x10808, 0x10808), (0x1080A, 0x10835), (0x10837, 0x10838), (0x1083C, 0x1083C),
    (0x1083F, 0x10855), (0x10900, 0x10915), (0x10920, 0x10939), (0x10980, 0x109B7),
    (0x109BE, 0x109BF), (0x10A00, 0x10A03), (0x10A05, 0x10A06), (0x10A0C, 0x10A13),
    (0x10A15, 0x10A17), (0x10A19, 0x10A33), (0x10A38, 0x10A3A), (0x10A3F, 0x10A3F),
    (0x10A60, 0x10A7C), (0x10B00, 0x10B35), (0x10B40, 0x10B55), (0x10B60, 0x10B72),
    (0x10C00, 0x10C48), (0x11000, 0x11046), (0x11066, 0x1106F), (0x11080, 0x110BA),
    (0x110D0, 0x110E8), (0x110F0, 0x110F9), (0x11100, 0x11134), (0x11136, 0x1113F),
    (0x11180, 0x111C8), (0x111D0, 0x111DA), (0x11680, 0x116B7), (0x116C0, 0x116C9),
    (0x12000, 0x1236E), (0x12400, 0x12462), (0x13000, 0x1342E), (0x16800, 0x16A38),
    (0x16F00, 0x16F44), (0x16F50, 0x16F7E), (0x16F8F, 0x16F9F), (0x1B000, 0x1B001),
    (0x1D165, 0x1D169), (0x1D16D, 0x1D172), (0x1D17B, 0x1D182), (0x1D185, 0x1D18B),
    (0x1D1AA, 0x1D1AD), (0x1D242, 0x1D244), (0x1D400, 0x1D454), (0x1D456, 0x1D49C),
    (0x1D49E, 0x1D49F), (0x1D4A2, 0x1D4A2), (0x1D4A5, 0x1D4A6), (0x1D4A9, 0x1D4AC),
    (0x1D4AE, 0x1D4B9), (0x1D4BB, 0x1D4BB), (0x1D4BD, 0x1D4C3), (0x1D4C5, 0x1D505),
    (0x1D507, 0x1D50A), (0x1D50D, 0x1D514), (0x1D516, 0x1D51C), (0x1D51E, 0x1D539),
    (0x1D53B, 0x1D53E), (0x1D540, 0x1D544), (0x1D546, 0x1D546), (0x1D54A, 0x1D550),
    (0x1D552, 0x1D6A5), (0x1D6A8, 0x1D6C0), (0x1D6C2, 0x1D6DA), (0x1D6DC, 0x1D6FA),
    (0x1D6FC, 0x1D714), (0x1D716, 0x1D734), (0x1D736, 0x1D74E), (0x1D750, 0x1D76E),
    (0x1D770, 0x1D788), (0x1D78A, 0x1D7A8), (0x1D7AA, 0x1D7C2), (0x1D7C4, 0x1D7CB),
    (0x1D7CE, 0x1D7FF), (0x1EE00, 0x1EE03), (0x1EE05, 0x1EE1F), (0x1EE21, 0x1EE22),
    (0x1EE24, 0x1EE24), (0x1EE27, 0x1EE27), (0x1EE29, 0x1EE32), (0x1EE34, 0x1EE37),
    (0x1EE39, 0x1EE39), (0x1EE3B, 0x1EE3B), (0x1EE42, 0x1EE42), (0x1EE47, 0x1EE47),
    (0x1EE49, 0x1EE49), (0x1EE4B, 0x1EE4B), (0x1EE4D, 0x1EE4F), (0x1EE51, 0x1EE52),
    (0x1EE54, 0x1EE54), (0x1EE57, 0x1EE57), (0x1EE59, 0x1EE59), (0x1EE5B, 0x1EE5B),
    (0x1EE5D, 0x1EE5D), (0x1EE5F, 0x1EE5F), (0x1EE61, 0x1EE62), (0x1EE64, 0x1EE64),
    (0x1EE67, 0x1EE6A), (0x1EE6C, 0x1EE72), (0x1EE74, 0x1EE77), (0x1EE79, 0x1EE7C),
    (0x1EE7E, 0x1EE7E), (0x1EE80, 0x1EE89), (0x1EE8B, 0x1EE9B), (0x1EEA1, 0x1EEA3),
    (0x1EEA5, 0x1EEA9), (0x1EEAB, 0x1EEBB), (0x1EEF0, 0x1EEF1), (0x20000, 0x2A6D6),
    (0x2A700, 0x2B734), (0x2B740, 0x2B81D), (0x2F800, 0x2FA1D), (0xE0100, 0xE01EF),
];
