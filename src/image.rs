use crate::error::CardError;
use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// How the pixels end up in the PDF
pub enum ImageData {
    /// Baseline RGB JPEGs are embedded byte-for-byte
    Jpeg(Vec<u8>),
    /// Everything else is decoded and re-encoded with deflate
    Raster(DynamicImage),
}

/// A raster image (card art or a card overlay) registered with a document
pub struct Image {
    pub data: ImageData,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image file. The format is detected from the file contents,
    /// except for TGA files which are recognised by extension.
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, CardError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let is_tga = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("tga"))
            .unwrap_or(false);
        let format = if is_tga {
            ImageFormat::Tga
        } else {
            image::guess_format(&data)?
        };
        Image::new_from_memory(data, format)
    }

    /// Decode an encoded image held in memory
    pub fn new_from_memory(data: Vec<u8>, format: ImageFormat) -> Result<Image, CardError> {
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => Ok(Image {
                width: image.width() as f32,
                height: image.height() as f32,
                data: ImageData::Jpeg(data),
            }),
            _ => Ok(Image::new_raster(image)),
        }
    }

    /// Wrap an already-decoded image
    pub fn new_raster(image: DynamicImage) -> Image {
        Image {
            width: image.width() as f32,
            height: image.height() as f32,
            data: ImageData::Raster(image),
        }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            ImageData::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            ImageData::Raster(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|(_, _, p)| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();
        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // alpha goes in a separate greyscale soft mask
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.data {
            ImageData::Jpeg(_) => "jpeg",
            ImageData::Raster(_) => "raster",
        };
        f.debug_struct("Image")
            .field("kind", &kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
