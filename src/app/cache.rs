// src/app/cache.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};
use std::time::{Duration, SystemTime};

use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use reqwest::blocking::Client;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{load_config, resolve_relative_path, DEFAULT_CACHE_DIR};

// Chosen once on first call
static CACHE_DIR_ONCE: OnceLock<PathBuf> = OnceLock::new();
static THUMB_DIR_ONCE: OnceLock<PathBuf> = OnceLock::new();
static THUMB_PRUNE_ONCE: Once = Once::new();
static FULL_DIR_ONCE: OnceLock<PathBuf> = OnceLock::new();
static FULL_PRUNE_ONCE: Once = Once::new();

const CACHE_RETENTION_DAYS: u64 = 30;
const CACHE_RETENTION_SECS: u64 = CACHE_RETENTION_DAYS * 24 * 60 * 60;

pub const THUMB_MAX_W: u32 = 480;
pub const FULL_MAX_W: u32 = 1920;
pub const JPEG_QUALITY: u8 = 80;

const IMAGE_EXTS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Which on-disk cache an image lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// Card, header and screenshot-strip art.
    Thumb,
    /// Gallery screenshots.
    Full,
}

impl ImageKind {
    const fn subdir(self) -> &'static str {
        match self {
            Self::Thumb => "thumbs",
            Self::Full => "shots",
        }
    }

    pub const fn max_width(self) -> u32 {
        match self {
            Self::Thumb => THUMB_MAX_W,
            Self::Full => FULL_MAX_W,
        }
    }

    pub fn dir(self) -> PathBuf {
        match self {
            Self::Thumb => sub_cache_dir(self, &THUMB_DIR_ONCE, &THUMB_PRUNE_ONCE),
            Self::Full => sub_cache_dir(self, &FULL_DIR_ONCE, &FULL_PRUNE_ONCE),
        }
    }
}

pub fn cache_dir() -> PathBuf {
    CACHE_DIR_ONCE
        .get_or_init(|| {
            let cfg = load_config();
            let mut path = cfg
                .cache_dir
                .as_deref()
                .map(resolve_relative_path)
                .unwrap_or_else(|| resolve_relative_path(DEFAULT_CACHE_DIR));

            if let Err(e) = fs::create_dir_all(&path) {
                warn!("failed to create cache dir {}: {e}", path.display());
                // Fall back to local folder if creation failed
                path = resolve_relative_path(DEFAULT_CACHE_DIR);
                let _ = fs::create_dir_all(&path);
            }
            path
        })
        .clone()
}

/// `<cache>/<subdir>`, created and pruned on first use.
fn sub_cache_dir(kind: ImageKind, dir_once: &OnceLock<PathBuf>, prune_once: &Once) -> PathBuf {
    let dir = dir_once.get_or_init(|| {
        let mut path = cache_dir().join(kind.subdir());
        if let Err(e) = fs::create_dir_all(&path) {
            warn!("failed to create {} cache dir {}: {e}", kind.subdir(), path.display());
            path = cache_dir();
        }
        path
    });

    prune_once.call_once(|| match prune_cache_in_dir(dir, SystemTime::now()) {
        Ok(n) if n > 0 => debug!("pruned {n} stale images from {}", dir.display()),
        Ok(_) => {}
        Err(err) => warn!("{} cache prune failed: {err}", kind.subdir()),
    });

    dir.clone()
}

/// Remove aged images and leftover `.part` files. Returns how many files went.
pub(crate) fn prune_cache_in_dir(dir: &Path, now: SystemTime) -> std::io::Result<usize> {
    let cutoff = now
        .checked_sub(Duration::from_secs(CACHE_RETENTION_SECS))
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let mut removed = 0usize;
    for entry in WalkDir::new(dir).max_depth(1).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let Some(ext) = ext else {
            continue;
        };
        let stale = if ext == "part" {
            true
        } else if IMAGE_EXTS.contains(&ext.as_str()) {
            let modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            modified < cutoff
        } else {
            false
        };
        if stale && fs::remove_file(path).is_ok() {
            removed += 1;
        }
    }
    Ok(removed)
}

pub fn url_to_cache_key(url: &str) -> String {
    format!("{:x}", md5::compute(url.as_bytes()))
}

/// Decode a cached image file into (width, height, RGBA8 bytes).
pub fn load_rgba_image(path: &Path) -> Result<(u32, u32, Vec<u8>), String> {
    let img = image::ImageReader::open(path)
        .map_err(|e| format!("open image {}: {e}", path.display()))?
        .with_guessed_format()
        .map_err(|e| format!("guess format {}: {e}", path.display()))?
        .decode()
        .map_err(|e| format!("decode {}: {e}", path.display()))?;
    let (w, h) = img.dimensions();
    Ok((w, h, img.to_rgba8().into_raw()))
}

pub(crate) fn find_any_by_key_in(dir: &Path, key: &str) -> Option<PathBuf> {
    IMAGE_EXTS
        .iter()
        .map(|ext| dir.join(format!("{key}.{ext}")))
        .find(|p| p.exists())
}

pub fn find_any_by_key(kind: ImageKind, key: &str) -> Option<PathBuf> {
    find_any_by_key_in(&kind.dir(), key)
}

/// Shrink to `max_width` (keeping aspect) and encode as JPEG.
pub(crate) fn encode_thumbnail(img: DynamicImage, max_width: u32, quality: u8) -> Result<Vec<u8>, String> {
    let (w, h) = img.dimensions();
    let out = if w > max_width {
        let new_h = ((h as f32) * (max_width as f32 / w as f32))
            .round()
            .max(1.0) as u32;
        img.resize_exact(max_width, new_h, FilterType::CatmullRom)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let rgb = out.to_rgb8();
    let mut jpeg_bytes: Vec<u8> = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_bytes, quality);
    encoder
        .encode_image(&rgb)
        .map_err(|e| format!("jpeg encode: {e}"))?;
    Ok(jpeg_bytes)
}

fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = dest.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let tmp = dest.with_extension("part");
    {
        let mut f = fs::File::create(&tmp).map_err(|e| format!("create tmp: {e}"))?;
        f.write_all(bytes).map_err(|e| format!("write: {e}"))?;
    }
    fs::rename(&tmp, dest).map_err(|e| format!("rename: {e}"))
}

/// Store already-downloaded image bytes as `<dir>/<key>.jpg` at most
/// `max_width` wide, or as PNG when the JPEG path fails.
pub(crate) fn store_image_bytes(dir: &Path, key: &str, bytes: &[u8], max_width: u32) -> Result<PathBuf, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("decode: {e}"))?;

    let dest = dir.join(format!("{key}.jpg"));
    match encode_thumbnail(img.clone(), max_width, JPEG_QUALITY) {
        Ok(jpeg) => {
            write_atomic(&dest, &jpeg)?;
            Ok(dest)
        }
        Err(e) => {
            warn!("thumbnail encode failed for {key}: {e}; storing png");
            let dest = dir.join(format!("{key}.png"));
            let mut png_bytes: Vec<u8> = Vec::new();
            img.write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
                .map_err(|e| format!("encode png: {e}"))?;
            write_atomic(&dest, &png_bytes)?;
            Ok(dest)
        }
    }
}

/// Fetch `url` with a shared client and cache it under `key` in `kind`'s dir.
///
/// Returns the existing file when one is already cached.
pub fn download_and_store_with_client(
    client: &Client,
    url: &str,
    key: &str,
    kind: ImageKind,
) -> Result<PathBuf, String> {
    let dir = kind.dir();
    if let Some(existing) = find_any_by_key_in(&dir, key) {
        return Ok(existing);
    }

    let bytes = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| format!("download {url}: {e}"))?;

    store_image_bytes(&dir, key, &bytes, kind.max_width())
}
