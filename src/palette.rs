//! The two fixed palettes: named web colors and relay chat color codes.
//!
//! Both tables are built once, on first use or by an explicit
//! [`init_palettes`] call, and are read-only afterwards. Iteration order is
//! the fixed declaration order below, which [`Color::nearest_name`] depends on.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::color::Color;

/// Sentinel code for "no foreground" when only a background is sent.
pub const SENTINEL_CODE: u8 = 99;

/// Named colors, in lookup order.
static NAMED_DATA: [(&str, u8, u8, u8); 147] = [
    ("aliceblue", 240, 248, 255),
    ("antiquewhite", 250, 235, 215),
    ("aqua", 0, 255, 255),
    ("aquamarine", 127, 255, 212),
    ("azure", 240, 255, 255),
    ("beige", 245, 245, 220),
    ("bisque", 255, 228, 196),
    ("black", 0, 0, 0),
    ("blanchedalmond", 255, 235, 205),
    ("blue", 0, 0, 255),
    ("blueviolet", 138, 43, 226),
    ("brown", 165, 42, 42),
    ("burlywood", 222, 184, 135),
    ("cadetblue", 95, 158, 160),
    ("chartreuse", 127, 255, 0),
    ("chocolate", 210, 105, 30),
    ("coral", 255, 127, 80),
    ("cornflowerblue", 100, 149, 237),
    ("cornsilk", 255, 248, 220),
    ("crimson", 220, 20, 60),
    ("cyan", 0, 255, 255),
    ("darkblue", 0, 0, 139),
    ("darkcyan", 0, 139, 139),
    ("darkgoldenrod", 184, 134, 11),
    ("darkgray", 169, 169, 169),
    ("darkgreen", 0, 100, 0),
    ("darkgrey", 169, 169, 169),
    ("darkkhaki", 189, 183, 107),
    ("darkmagenta", 139, 0, 139),
    ("darkolivegreen", 85, 107, 47),
    ("darkorange", 255, 140, 0),
    ("darkorchid", 153, 50, 204),
    ("darkred", 139, 0, 0),
    ("darksalmon", 233, 150, 122),
    ("darkseagreen", 143, 188, 143),
    ("darkslateblue", 72, 61, 139),
    ("darkslategray", 47, 79, 79),
    ("darkslategrey", 47, 79, 79),
    ("darkturquoise", 0, 206, 209),
    ("darkviolet", 148, 0, 211),
    ("deeppink", 255, 20, 147),
    ("deepskyblue", 0, 191, 255),
    ("dimgray", 105, 105, 105),
    ("dimgrey", 105, 105, 105),
    ("dodgerblue", 30, 144, 255),
    ("firebrick", 178, 34, 34),
    ("floralwhite", 255, 250, 240),
    ("forestgreen", 34, 139, 34),
    ("fuchsia", 255, 0, 255),
    ("gainsboro", 220, 220, 220),
    ("ghostwhite", 248, 248, 255),
    ("gold", 255, 215, 0),
    ("goldenrod", 218, 165, 32),
    ("gray", 128, 128, 128),
    ("grey", 128, 128, 128),
    ("green", 0, 128, 0),
    ("greenyellow", 173, 255, 47),
    ("honeydew", 240, 255, 240),
    ("hotpink", 255, 105, 180),
    ("indianred", 205, 92, 92),
    ("indigo", 75, 0, 130),
    ("ivory", 255, 255, 240),
    ("khaki", 240, 230, 140),
    ("lavender", 230, 230, 250),
    ("lavenderblush", 255, 240, 245),
    ("lawngreen", 124, 252, 0),
    ("lemonchiffon", 255, 250, 205),
    ("lightblue", 173, 216, 230),
    ("lightcoral", 240, 128, 128),
    ("lightcyan", 224, 255, 255),
    ("lightgoldenrodyellow", 250, 250, 210),
    ("lightgray", 211, 211, 211),
    ("lightgreen", 144, 238, 144),
    ("lightgrey", 211, 211, 211),
    ("lightpink", 255, 182, 193),
    ("lightsalmon", 255, 160, 122),
    ("lightseagreen", 32, 178, 170),
    ("lightskyblue", 135, 206, 250),
    ("lightslategray", 119, 136, 153),
    ("lightslategrey", 119, 136, 153),
    ("lightsteelblue", 176, 196, 222),
    ("lightyellow", 255, 255, 224),
    ("lime", 0, 255, 0),
    ("limegreen", 50, 205, 50),
    ("linen", 250, 240, 230),
    ("magenta", 255, 0, 255),
    ("maroon", 128, 0, 0),
    ("mediumaquamarine", 102, 205, 170),
    ("mediumblue", 0, 0, 205),
    ("mediumorchid", 186, 85, 211),
    ("mediumpurple", 147, 112, 219),
    ("mediumseagreen", 60, 179, 113),
    ("mediumslateblue", 123, 104, 238),
    ("mediumspringgreen", 0, 250, 154),
    ("mediumturquoise", 72, 209, 204),
    ("mediumvioletred", 199, 21, 133),
    ("midnightblue", 25, 25, 112),
    ("mintcream", 245, 255, 250),
    ("mistyrose", 255, 228, 225),
    ("moccasin", 255, 228, 181),
    ("navajowhite", 255, 222, 173),
    ("navy", 0, 0, 128),
    ("oldlace", 253, 245, 230),
    ("olive", 128, 128, 0),
    ("olivedrab", 107, 142, 35),
    ("orange", 255, 165, 0),
    ("orangered", 255, 69, 0),
    ("orchid", 218, 112, 214),
    ("palegoldenrod", 238, 232, 170),
    ("palegreen", 152, 251, 152),
    ("paleturquoise", 175, 238, 238),
    ("palevioletred", 219, 112, 147),
    ("papayawhip", 255, 239, 213),
    ("peachpuff", 255, 218, 185),
    ("peru", 205, 133, 63),
    ("pink", 255, 192, 203),
    ("plum", 221, 160, 221),
    ("powderblue", 176, 224, 230),
    ("purple", 128, 0, 128),
    ("red", 255, 0, 0),
    ("rosybrown", 188, 143, 143),
    ("royalblue", 65, 105, 225),
    ("saddlebrown", 139, 69, 19),
    ("salmon", 250, 128, 114),
    ("sandybrown", 244, 164, 96),
    ("seagreen", 46, 139, 87),
    ("seashell", 255, 245, 238),
    ("sienna", 160, 82, 45),
    ("silver", 192, 192, 192),
    ("skyblue", 135, 206, 235),
    ("slateblue", 106, 90, 205),
    ("slategray", 112, 128, 144),
    ("slategrey", 112, 128, 144),
    ("snow", 255, 250, 250),
    ("springgreen", 0, 255, 127),
    ("steelblue", 70, 130, 180),
    ("tan", 210, 180, 140),
    ("teal", 0, 128, 128),
    ("thistle", 216, 191, 216),
    ("tomato", 255, 99, 71),
    ("turquoise", 64, 224, 208),
    ("violet", 238, 130, 238),
    ("wheat", 245, 222, 179),
    ("white", 255, 255, 255),
    ("whitesmoke", 245, 245, 245),
    ("yellow", 255, 255, 0),
    ("yellowgreen", 154, 205, 50),];

/// Numeric color codes. 0-15 are the classic client colors, 16-31 the
/// extended set, 99 the sentinel.
static CODE_DATA: [(u8, u32); 33] = [
    (0, 0xFF_FFFF),
    (1, 0x1F_1F1F),
    (2, 0x00_007F),
    (3, 0x00_7F00),
    (4, 0xFF_0000),
    (5, 0x7F_0000),
    (6, 0x9C_009C),
    (7, 0xFC_7F00),
    (8, 0xFF_FF00),
    (9, 0x00_FC00),
    (10, 0x00_8282),
    (11, 0x00_FFFF),
    (12, 0x00_00FC),
    (13, 0xFF_00FF),
    (14, 0x7F_7F7F),
    (15, 0xD2_D2D2),
    (16, 0xCC_CCCC),
    (17, 0x1F_1F1F),
    (18, 0x00_0056),
    (19, 0x00_8141),
    (20, 0xE0_0707),
    (21, 0xA1_0000),
    (22, 0x6A_006A),
    (23, 0xA1_5000),
    (24, 0xA1_A100),
    (25, 0x41_6600),
    (26, 0x00_5682),
    (27, 0x00_D5F2),
    (28, 0x07_15CD),
    (29, 0x99_004D),
    (30, 0x32_3232),
    (31, 0x92_9292),
    (SENTINEL_CODE, 0x99_9999),
];

static NAMED: LazyLock<Vec<(&'static str, Color)>> = LazyLock::new(|| {
    NAMED_DATA
        .iter()
        .map(|&(name, r, g, b)| (name, Color::named(name, r, g, b)))
        .collect()
});

static NAMED_INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    NAMED_DATA
        .iter()
        .enumerate()
        .map(|(i, &(name, ..))| (name, i))
        .collect()
});

static CODES: LazyLock<Vec<(u8, Color)>> = LazyLock::new(|| {
    CODE_DATA
        .iter()
        .map(|&(code, packed)| (code, Color::coded(code, packed)))
        .collect()
});

/// Build both palettes now instead of on first lookup.
///
/// Calling this before spawning threads that transcode keeps the one-time
/// construction off their hot path. Repeated calls are no-ops.
pub fn init_palettes() {
    LazyLock::force(&NAMED);
    LazyLock::force(&NAMED_INDEX);
    LazyLock::force(&CODES);
    log::debug!(
        "palettes ready: {} names, {} codes",
        NAMED.len(),
        CODES.len()
    );
}

/// Iterate the named palette in table order.
pub fn named_colors() -> impl Iterator<Item = (&'static str, &'static Color)> {
    NAMED.iter().map(|(name, color)| (*name, color))
}

/// Iterate the code palette in ascending code order.
pub fn code_colors() -> impl Iterator<Item = (u8, &'static Color)> {
    CODES.iter().map(|(code, color)| (*code, color))
}

/// Look up a named color, ignoring case.
#[must_use]
pub fn named_color(label: &str) -> Option<&'static Color> {
    let index = *NAMED_INDEX.get(label.to_lowercase().as_str())?;
    NAMED.get(index).map(|(_, color)| color)
}

/// Look up a numeric code.
#[must_use]
pub fn code_color(code: u8) -> Option<&'static Color> {
    CODES
        .iter()
        .find(|(entry, _)| *entry == code)
        .map(|(_, color)| color)
}
