// this_file: crates/glyphmesh/tests/common/mod.rs

//! Synthetic SFNT files for integration tests.
#![allow(dead_code)]

pub fn be16(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn pad4(data: &mut Vec<u8>) {
    while data.len() % 4 != 0 {
        data.push(0);
    }
}

/// `glyf` record for a simple glyph; points are `(x, y, on_curve)`.
pub fn simple_glyph(contours: &[&[(i16, i16, bool)]]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(contours.len() as i16).to_be_bytes());
    data.extend_from_slice(&[0; 8]);

    let mut end = 0usize;
    for contour in contours {
        end += contour.len();
        data.extend_from_slice(&((end - 1) as u16).to_be_bytes());
    }
    data.extend_from_slice(&be16(&[0])); // no instructions

    let points: Vec<(i16, i16, bool)> = contours.iter().flat_map(|c| c.iter().copied()).collect();
    // word-sized deltas throughout: only the on-curve bit is ever set
    data.extend(points.iter().map(|&(_, _, on)| on as u8));

    let (mut last_x, mut last_y) = (0i16, 0i16);
    let mut ys = Vec::new();
    for &(x, y, _) in &points {
        data.extend_from_slice(&(x - last_x).to_be_bytes());
        ys.extend_from_slice(&(y - last_y).to_be_bytes());
        last_x = x;
        last_y = y;
    }
    data.extend_from_slice(&ys);
    data
}

/// Clockwise square, the usual outer contour orientation.
pub fn square(x0: i16, y0: i16, x1: i16, y1: i16) -> Vec<(i16, i16, bool)> {
    vec![(x0, y0, true), (x0, y1, true), (x1, y1, true), (x1, y0, true)]
}

/// Counter-clockwise square, the usual hole orientation.
pub fn square_hole(x0: i16, y0: i16, x1: i16, y1: i16) -> Vec<(i16, i16, bool)> {
    vec![(x1, y0, true), (x1, y1, true), (x0, y1, true), (x0, y0, true)]
}

/// `glyf` record for a compound glyph of `(glyph, dx, dy)` word-offset
/// components.
pub fn compound_glyph(components: &[(u16, i16, i16)]) -> Vec<u8> {
    const ARGS_ARE_WORDS: u16 = 1 << 0;
    const ARGS_ARE_XY_VALUES: u16 = 1 << 1;
    const MORE_COMPONENTS: u16 = 1 << 5;

    let mut data = Vec::new();
    data.extend_from_slice(&(-1i16).to_be_bytes());
    data.extend_from_slice(&[0; 8]);
    for (i, &(glyph, dx, dy)) in components.iter().enumerate() {
        let mut flags = ARGS_ARE_WORDS | ARGS_ARE_XY_VALUES;
        if i + 1 < components.len() {
            flags |= MORE_COMPONENTS;
        }
        data.extend_from_slice(&be16(&[flags, glyph]));
        data.extend_from_slice(&dx.to_be_bytes());
        data.extend_from_slice(&dy.to_be_bytes());
    }
    data
}

/// PairPos format 1 subtable with x-advance-only value records.
pub fn pair_pos_format1(pairs: &[(u16, u16, i16)]) -> Vec<u8> {
    let mut lefts: Vec<u16> = pairs.iter().map(|p| p.0).collect();
    lefts.sort_unstable();
    lefts.dedup();

    let header_len = 10 + 2 * lefts.len();
    let coverage_len = 4 + 2 * lefts.len();

    let mut sets = Vec::new();
    let mut set_offsets = Vec::new();
    for &left in &lefts {
        set_offsets.push((header_len + coverage_len + sets.len()) as u16);
        let rights: Vec<_> = pairs.iter().filter(|p| p.0 == left).collect();
        sets.extend_from_slice(&be16(&[rights.len() as u16]));
        for &&(_, right, advance) in &rights {
            sets.extend_from_slice(&be16(&[right]));
            sets.extend_from_slice(&advance.to_be_bytes());
        }
    }

    let mut data = be16(&[1, header_len as u16, 0x0004, 0, lefts.len() as u16]);
    data.extend_from_slice(&be16(&set_offsets));
    data.extend_from_slice(&be16(&[1, lefts.len() as u16]));
    data.extend_from_slice(&be16(&lefts));
    data.extend_from_slice(&sets);
    data
}

/// `GPOS` table whose `kern` feature references every lookup, each given as
/// `(lookup type, lookup flag, single subtable)`.
pub fn gpos_table(lookups: &[(u16, u16, Vec<u8>)]) -> Vec<u8> {
    let n = lookups.len() as u16;
    let script_list = 10u16;
    let feature_list = 12u16;
    let lookup_list = feature_list + 8 + 4 + 2 * n;

    let mut data = be16(&[1, 0, script_list, feature_list, lookup_list]);
    data.extend_from_slice(&be16(&[0]));

    data.extend_from_slice(&be16(&[1]));
    data.extend_from_slice(b"kern");
    data.extend_from_slice(&be16(&[8]));
    data.extend_from_slice(&be16(&[0, n]));
    data.extend_from_slice(&be16(&(0..n).collect::<Vec<_>>()));

    let mut offset = 2 + 2 * n;
    let mut offsets = Vec::new();
    for (_, _, subtable) in lookups {
        offsets.push(offset);
        offset += 8 + subtable.len() as u16;
    }
    data.extend_from_slice(&be16(&[n]));
    data.extend_from_slice(&be16(&offsets));
    for (kind, flag, subtable) in lookups {
        data.extend_from_slice(&be16(&[*kind, *flag, 1, 8]));
        data.extend_from_slice(subtable);
    }
    data
}

struct TestGlyph {
    advance: u16,
    lsb: i16,
    data: Vec<u8>,
}

enum Cmap {
    Format4(Vec<(u16, u16)>),
    Format12(Vec<(u32, u16)>),
}

/// Assembles a minimal TrueType font.
pub struct FontBuilder {
    units_per_em: u16,
    glyphs: Vec<TestGlyph>,
    cmap: Cmap,
    gpos: Option<Vec<u8>>,
    long_loca: bool,
    long_metrics: Option<u16>,
    omit: Vec<&'static [u8; 4]>,
}

impl FontBuilder {
    pub fn new(units_per_em: u16) -> Self {
        Self {
            units_per_em,
            glyphs: Vec::new(),
            cmap: Cmap::Format4(Vec::new()),
            gpos: None,
            long_loca: false,
            long_metrics: None,
            omit: Vec::new(),
        }
    }

    /// Append a glyph; its id is the number of glyphs added before it.
    pub fn glyph(mut self, advance: u16, lsb: i16, data: Vec<u8>) -> Self {
        self.glyphs.push(TestGlyph { advance, lsb, data });
        self
    }

    /// Glyph with no outline.
    pub fn empty_glyph(self, advance: u16) -> Self {
        self.glyph(advance, 0, Vec::new())
    }

    /// Map a character through a format 4 subtable.
    pub fn map(mut self, c: char, glyph: u16) -> Self {
        let code = c as u32;
        match &mut self.cmap {
            Cmap::Format4(entries) => entries.push((code as u16, glyph)),
            Cmap::Format12(entries) => entries.push((code, glyph)),
        }
        self
    }

    /// Switch to a format 12 subtable, which can map glyph 0 too.
    pub fn format12(mut self) -> Self {
        let entries = match &self.cmap {
            Cmap::Format4(entries) => entries.iter().map(|&(c, g)| (c as u32, g)).collect(),
            Cmap::Format12(entries) => entries.clone(),
        };
        self.cmap = Cmap::Format12(entries);
        self
    }

    pub fn gpos(mut self, table: Vec<u8>) -> Self {
        self.gpos = Some(table);
        self
    }

    pub fn long_loca(mut self) -> Self {
        self.long_loca = true;
        self
    }

    /// Store only the first `count` full metrics records.
    pub fn long_metrics(mut self, count: u16) -> Self {
        self.long_metrics = Some(count);
        self
    }

    pub fn without_table(mut self, tag: &'static [u8; 4]) -> Self {
        self.omit.push(tag);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
            (b"head", self.head()),
            (b"maxp", self.maxp()),
            (b"hhea", self.hhea()),
            (b"hmtx", self.hmtx()),
            (b"cmap", self.cmap()),
        ];
        let (loca, glyf) = self.loca_and_glyf();
        tables.push((b"loca", loca));
        tables.push((b"glyf", glyf));
        if let Some(gpos) = &self.gpos {
            tables.push((b"GPOS", gpos.clone()));
        }
        tables.retain(|(tag, _)| !self.omit.contains(tag));

        let mut data = vec![0, 1, 0, 0];
        data.extend_from_slice(&be16(&[tables.len() as u16, 0, 0, 0]));
        let mut offset = 12 + 16 * tables.len();
        for (tag, body) in &tables {
            data.extend_from_slice(*tag);
            data.extend_from_slice(&0u32.to_be_bytes());
            data.extend_from_slice(&(offset as u32).to_be_bytes());
            data.extend_from_slice(&(body.len() as u32).to_be_bytes());
            offset += (body.len() + 3) & !3;
        }
        for (_, body) in &tables {
            data.extend_from_slice(body);
            pad4(&mut data);
        }
        data
    }

    fn head(&self) -> Vec<u8> {
        let mut head = vec![0u8; 54];
        head[0..4].copy_from_slice(&[0, 1, 0, 0]);
        head[18..20].copy_from_slice(&self.units_per_em.to_be_bytes());
        head[50..52].copy_from_slice(&(self.long_loca as i16).to_be_bytes());
        head
    }

    fn maxp(&self) -> Vec<u8> {
        let mut maxp = vec![0, 0, 0x50, 0];
        maxp.extend_from_slice(&(self.glyphs.len() as u16).to_be_bytes());
        maxp
    }

    fn number_of_hmetrics(&self) -> u16 {
        self.long_metrics.unwrap_or(self.glyphs.len() as u16)
    }

    fn hhea(&self) -> Vec<u8> {
        let mut hhea = vec![0u8; 36];
        hhea[0..4].copy_from_slice(&[0, 1, 0, 0]);
        hhea[34..36].copy_from_slice(&self.number_of_hmetrics().to_be_bytes());
        hhea
    }

    fn hmtx(&self) -> Vec<u8> {
        let long = self.number_of_hmetrics() as usize;
        let mut hmtx = Vec::new();
        for (i, glyph) in self.glyphs.iter().enumerate() {
            if i < long {
                hmtx.extend_from_slice(&glyph.advance.to_be_bytes());
            }
            hmtx.extend_from_slice(&glyph.lsb.to_be_bytes());
        }
        hmtx
    }

    fn loca_and_glyf(&self) -> (Vec<u8>, Vec<u8>) {
        let mut glyf = Vec::new();
        let mut offsets = vec![0usize];
        for glyph in &self.glyphs {
            glyf.extend_from_slice(&glyph.data);
            pad4(&mut glyf);
            offsets.push(glyf.len());
        }
        let loca = if self.long_loca {
            offsets.iter().flat_map(|&o| (o as u32).to_be_bytes()).collect()
        } else {
            offsets.iter().flat_map(|&o| ((o / 2) as u16).to_be_bytes()).collect()
        };
        (loca, glyf)
    }

    fn cmap(&self) -> Vec<u8> {
        let (encoding, subtable) = match &self.cmap {
            Cmap::Format4(entries) => (3, format4(entries)),
            Cmap::Format12(entries) => (4, format12(entries)),
        };
        let mut cmap = be16(&[0, 1, 0, encoding]);
        cmap.extend_from_slice(&12u32.to_be_bytes());
        cmap.extend_from_slice(&subtable);
        cmap
    }
}

/// One single-code segment per mapping, all through `idDelta`.
fn format4(entries: &[(u16, u16)]) -> Vec<u8> {
    let mut entries = entries.to_vec();
    entries.sort_unstable();
    let seg_count = entries.len() as u16 + 1;

    let mut ends: Vec<u16> = entries.iter().map(|e| e.0).collect();
    ends.push(0xFFFF);
    let starts = ends.clone();
    let mut deltas: Vec<u16> = entries.iter().map(|&(c, g)| g.wrapping_sub(c)).collect();
    deltas.push(1);

    let mut data = be16(&[4, 16 + 8 * seg_count, 0, seg_count * 2, 0, 0, 0]);
    data.extend_from_slice(&be16(&ends));
    data.extend_from_slice(&be16(&[0]));
    data.extend_from_slice(&be16(&starts));
    data.extend_from_slice(&be16(&deltas));
    data.extend_from_slice(&be16(&vec![0; seg_count as usize]));
    data
}

fn format12(entries: &[(u32, u16)]) -> Vec<u8> {
    let mut data = be16(&[12, 0]);
    data.extend_from_slice(&(16 + 12 * entries.len() as u32).to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for &(code, glyph) in entries {
        for v in [code, code, glyph as u32] {
            data.extend_from_slice(&v.to_be_bytes());
        }
    }
    data
}

/// `.notdef`, space, a square `A`, a ring `O`, `V` and `B`, with A/V kerned
/// by -120.
pub fn latin_font() -> Vec<u8> {
    let square_a = simple_glyph(&[&square(0, 0, 500, 700)]);
    let ring = simple_glyph(&[&square(0, 0, 100, 100), &square_hole(25, 25, 75, 75)]);
    let v = simple_glyph(&[&[(0, 700, true), (250, 0, true), (500, 700, true)]]);
    let b = simple_glyph(&[&square(50, 0, 450, 700)]);

    FontBuilder::new(1000)
        .empty_glyph(500)
        .empty_glyph(250)
        .glyph(600, 0, square_a)
        .glyph(700, 0, ring)
        .glyph(550, 0, v)
        .glyph(560, 50, b)
        .map(' ', 1)
        .map('A', 2)
        .map('O', 3)
        .map('V', 4)
        .map('B', 5)
        .gpos(gpos_table(&[(2, 0, pair_pos_format1(&[(2, 4, -120)]))]))
        .build()
}
