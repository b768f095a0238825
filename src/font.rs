use crate::{
    error::CardError,
    refs::{ObjectReferences, RefType},
};
use id_arena::Id;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::{BTreeMap, HashMap};

/// A parsed TrueType / OpenType font used for card text.
///
/// The whole font file is embedded in the PDF as a CID-keyed (Type0 / CIDFontType2)
/// font, and text is written as raw glyph ids, so any glyph in the font can be drawn.
/// Glyph advances are read once when the font is loaded; text measurement
/// ([crate::layout::FontMetrics]) and embedding both work from that table.
pub struct Font {
    face: OwnedFace,
    glyphs: GlyphTable,
}

/// Glyph ids reachable from unicode, with their horizontal advances in font units
#[derive(Debug, Default)]
struct GlyphTable {
    /// First codepoint seen for each glyph, used for the ToUnicode map
    chars: BTreeMap<u16, char>,
    /// Every mapped codepoint; several codepoints may share a glyph
    glyph_ids: HashMap<char, u16>,
    advances: BTreeMap<u16, u16>,
}

impl GlyphTable {
    fn build(face: &Face<'_>) -> GlyphTable {
        let mut table = GlyphTable::default();
        let Some(cmap) = face.tables().cmap else {
            return table;
        };

        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                    table.insert(ch, gid.0, || face.glyph_hor_advance(gid).unwrap_or_default());
                }
            });
        }

        table
    }

    fn insert<F: FnOnce() -> u16>(&mut self, ch: char, gid: u16, advance: F) {
        self.glyph_ids.entry(ch).or_insert(gid);
        self.chars.entry(gid).or_insert(ch);
        self.advances.entry(gid).or_insert_with(advance);
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, CardError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let glyphs = GlyphTable::build(face.as_face_ref());
        log::debug!("loaded font with {} mapped glyphs", glyphs.chars.len());
        Ok(Font { face, glyphs })
    }

    /// Load a font file from disk
    pub fn load_from_disk<P: AsRef<std::path::Path>>(path: P) -> Result<Font, CardError> {
        Font::load(std::fs::read(path)?)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn find_name(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if the font declares one
    pub fn name(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if the font declares one
    pub fn family(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FAMILY)
    }

    pub fn units_per_em(&self) -> u16 {
        self.face().units_per_em()
    }

    /// Distance from the baseline to the top of the line box, in font units
    pub fn ascender(&self) -> i16 {
        self.face().ascender()
    }

    /// Distance from the baseline to the bottom of the line box, in font units.
    /// Note: this is usually negative
    pub fn descender(&self) -> i16 {
        self.face().descender()
    }

    pub fn is_monospaced(&self) -> bool {
        self.face().is_monospaced()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}')
    }

    /// The glyph actually drawn for `ch`: its own glyph, else the replacement
    /// character, else `?`, else `.notdef`
    pub fn glyph_for(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Horizontal advance of a glyph in font units
    pub fn advance(&self, gid: u16) -> u16 {
        self.glyphs
            .advances
            .get(&gid)
            .copied()
            .or_else(|| self.face().glyph_hor_advance(GlyphId(gid)))
            .unwrap_or_default()
    }

    /// Advances (in font units) of every character the font maps
    pub(crate) fn char_advances(&self) -> HashMap<char, u16> {
        self.glyphs
            .glyph_ids
            .iter()
            .map(|(&ch, &gid)| (ch, self.advance(gid)))
            .collect()
    }

    /// Advance used for characters the font doesn't map
    pub(crate) fn fallback_advance(&self) -> u16 {
        self.advance(self.glyph_for('\u{FFFD}'))
    }

    fn scaling(&self) -> f32 {
        1000.0 / self.units_per_em() as f32
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let scaling = self.scaling();

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);

        // the most common advance becomes the default width
        let mut counts: HashMap<u16, usize> = HashMap::new();
        for advance in self.glyphs.advances.values() {
            *counts.entry(*advance).or_default() += 1;
        }
        let default_width = counts
            .into_iter()
            .max_by_key(|&(advance, count)| (count, advance))
            .map(|(advance, _)| advance as f32 * scaling)
            .unwrap_or(1000.0);

        // runs of consecutive glyph ids share one widths entry
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for (&gid, &advance) in self.glyphs.advances.iter() {
            let width = advance as f32 * scaling;
            match runs.last_mut() {
                Some((start, widths)) if *start as usize + widths.len() == gid as usize => {
                    widths.push(width)
                }
                _ => runs.push((gid, vec![width])),
            }
        }

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        for (start, run) in runs {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));
        let raw = self.face.as_slice();
        let compressed = compress_to_vec_zlib(raw, CompressionLevel::DefaultLevel as u8);

        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), raw.len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_id = self.write_font_data(refs, font_index, writer);
        let face = self.face();
        let scaling = self.scaling();

        let max_width = self.glyphs.advances.values().copied().max().unwrap_or_default();
        let avg_width = if self.glyphs.advances.is_empty() {
            0.0
        } else {
            self.glyphs.advances.values().map(|&w| w as f32).sum::<f32>()
                / self.glyphs.advances.len() as f32
        };

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let base_name = self.name().unwrap_or_else(|| format!("F{font_index}"));

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(base_name.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face
            .capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(700.0);
        descriptor.cap_height(cap_height);
        descriptor.x_height(
            face.x_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(cap_height),
        );
        // stem widths aren't exposed by the font tables we read
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(self.fallback_advance() as f32 * scaling);
        descriptor.font_file2(font_data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(concat!(
            "/CIDInit /ProcSet findresource begin\n",
            "12 dict begin\n",
            "begincmap\n",
            "/CIDSystemInfo\n",
            "<< /Registry (Adobe)\n",
            "/Ordering (UCS) /Supplement 0 >> def\n",
            "/CMapName /Adobe-Identity-UCS def\n",
            "/CMapType 2 def\n",
            "1 begincodespacerange\n",
            "<0000> <FFFF>\n",
            "endcodespacerange\n",
        ));

        // bfchar blocks hold at most 100 entries sharing a high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        for (&gid, &ch) in self.glyphs.chars.iter() {
            match blocks.last_mut() {
                Some(block) if block.len() < 100 && block[0].0 >> 8 == gid >> 8 => {
                    block.push((gid, ch))
                }
                _ => blocks.push(vec![(gid, ch)]),
            }
        }

        for block in blocks {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = compress_to_vec_zlib(map.as_bytes(), CompressionLevel::DefaultLevel as u8);
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("glyphs", &self.glyphs.chars.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEJAVU_MONO: &[u8] = include_bytes!("../tests/assets/DejaVuSansMono.ttf");

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let err = Font::load(vec![0u8; 16]).unwrap_err();
        assert!(matches!(err, CardError::FaceParsing(_)));
    }

    #[test]
    fn codepoints_sharing_a_glyph_all_get_its_advance() {
        let mut table = GlyphTable::default();
        table.insert(' ', 3, || 1233);
        table.insert('\u{a0}', 3, || 0);
        table.insert('M', 48, || 1233);

        assert_eq!(table.glyph_ids.get(&'\u{a0}'), Some(&3));
        assert_eq!(table.chars.get(&3), Some(&' '));
        assert_eq!(table.advances.get(&3), Some(&1233));
    }

    #[test]
    fn measured_advances_match_drawn_glyphs() {
        let font = Font::load(DEJAVU_MONO.to_vec()).unwrap();
        let advances = font.char_advances();
        assert!(advances.len() >= font.glyphs.chars.len());

        for ch in (' '..='~').chain(['\u{a0}', 'é', 'Ω']) {
            assert_eq!(
                advances.get(&ch).copied(),
                Some(font.advance(font.glyph_for(ch))),
                "advance of {ch:?}"
            );
        }
        assert_eq!(
            font.fallback_advance(),
            font.advance(font.glyph_for('\u{FFFD}'))
        );
    }

    #[test]
    fn reads_names_and_metrics() {
        let font = Font::load(DEJAVU_MONO.to_vec()).unwrap();
        assert_eq!(font.family().as_deref(), Some("DejaVu Sans Mono"));
        assert!(font.is_monospaced());
        assert_eq!(font.units_per_em(), 2048);
        assert!(font.ascender() > 0 && font.descender() < 0);
        assert_ne!(font.glyph_for('M'), 0);
    }
}
