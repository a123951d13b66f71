//! On-disk HRIR database loading for the `DatabaseBinaural` directivity
//! (Kemar and CIPIC layouts), plus a lazily-initialised, thread-safe cache
//! shared read-only across receivers with matching (sampling rate, HRIR
//! length), per spec §5 and §9 ("Global HRIR cache").
//!
//! The raw impulse-response sample data itself is out of scope (see
//! `DESIGN.md`); this module only knows how to find the right file and the
//! right tap vector inside it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use aural_core::Sample;

use crate::error::{Result, SimError};

use super::binaural::Ear;

/// The two supported on-disk HRIR layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrirDatabaseKind {
    Kemar,
    Cipic,
}

/// Which way the receiver's local x/y axis is treated as the facing
/// direction when converting a relative point to (azimuth, elevation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadRefOrientation {
    #[default]
    FacingX,
    FacingY,
}

const KEMAR_ELEVATIONS: [i32; 14] = [-40, -30, -20, -10, 0, 10, 20, 30, 40, 50, 60, 70, 80, 90];
const KEMAR_AZIMUTH_COUNTS: [usize; 14] = [56, 60, 72, 72, 72, 72, 72, 60, 56, 45, 36, 24, 12, 1];
const KEMAR_NORMALISATION: f64 = 30000.0;

const CIPIC_AZIMUTHS_DEG: [f64; 25] = [
    -80.0, -65.0, -55.0, -45.0, -40.0, -35.0, -30.0, -25.0, -20.0, -15.0, -10.0, -5.0, 0.0, 5.0, 10.0, 15.0, 20.0,
    25.0, 30.0, 35.0, 40.0, 45.0, 55.0, 65.0, 80.0,
];
const CIPIC_NUM_ELEVATIONS: usize = 50;
const CIPIC_ELEVATION_SPACING_DEG: f64 = 5.625;
const CIPIC_ELEVATION_START_DEG: f64 = -45.0;

/// Sampling rates the on-disk databases are actually tabulated (or
/// downsampled) for; anything else falls back to 44.1 kHz (spec §7 kind-2).
const SUPPORTED_SAMPLE_RATES: [f64; 2] = [44100.0, 22050.0];
const FALLBACK_SAMPLE_RATE: f64 = 44100.0;

fn resolve_sampling_frequency(requested: f64) -> f64 {
    if SUPPORTED_SAMPLE_RATES.iter().any(|&rate| (rate - requested).abs() < 1.0) {
        requested
    } else {
        log::warn!("unsupported HRIR sampling rate {requested} Hz; falling back to {FALLBACK_SAMPLE_RATE} Hz");
        FALLBACK_SAMPLE_RATE
    }
}

/// A loaded, direction-indexed table of impulse responses for one ear.
#[derive(Debug)]
struct EarTable {
    /// `table[elevation_index][azimuth_half_index]`, half the azimuths only
    /// (the other half comes back via ear-swap, per spec §6).
    taps: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug)]
struct LoadedDatabase {
    kind: HrirDatabaseKind,
    sampling_frequency: f64,
    hrir_length: usize,
    left: EarTable,
    right: EarTable,
}

type CacheKey = (u8, u64, usize);

fn cache() -> &'static Mutex<HashMap<CacheKey, Arc<LoadedDatabase>>> {
    static CACHE: OnceLock<Mutex<HashMap<CacheKey, Arc<LoadedDatabase>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn cache_key(kind: HrirDatabaseKind, sampling_frequency: f64, hrir_length: usize) -> CacheKey {
    let kind_tag = match kind {
        HrirDatabaseKind::Kemar => 0,
        HrirDatabaseKind::Cipic => 1,
    };
    (kind_tag, sampling_frequency.to_bits(), hrir_length)
}

/// A shared (or, if the cache misses, per-instance) handle onto a loaded
/// HRIR database, generic over the sample type used for the returned taps.
#[derive(Debug, Clone)]
pub struct HrirDatabaseHandle<S: Sample> {
    db: Arc<LoadedDatabase>,
    _marker: std::marker::PhantomData<S>,
}

impl<S: Sample> HrirDatabaseHandle<S> {
    /// Load (or fetch from the shared cache) the database at `directory`.
    ///
    /// An unsupported sampling rate falls back to the 44.1 kHz database with
    /// a logged warning, per spec §7 kind-2; the directory itself missing or
    /// unreadable, or a malformed file inside it, are kind-3 fatal failures.
    pub fn load(
        kind: HrirDatabaseKind,
        directory: impl AsRef<Path>,
        sampling_frequency: f64,
        hrir_length: usize,
    ) -> Result<Self> {
        let sampling_frequency = resolve_sampling_frequency(sampling_frequency);
        let key = cache_key(kind, sampling_frequency, hrir_length);
        {
            let guard = cache().lock().expect("hrir cache mutex poisoned");
            if let Some(db) = guard.get(&key) {
                return Ok(Self { db: db.clone(), _marker: std::marker::PhantomData });
            }
        }

        let db = Arc::new(load_database(kind, directory.as_ref(), sampling_frequency, hrir_length)?);

        let mut guard = cache().lock().expect("hrir cache mutex poisoned");
        let db = guard.entry(key).or_insert_with(|| db.clone()).clone();
        Ok(Self { db, _marker: std::marker::PhantomData })
    }

    pub fn kind(&self) -> HrirDatabaseKind {
        self.db.kind
    }

    pub fn hrir_length(&self) -> usize {
        self.db.hrir_length
    }

    /// Nearest-neighbour BRIR lookup for `ear` at `(azimuth_deg, elevation_deg)`.
    pub fn nearest_brir(&self, ear: Ear, azimuth_deg: f64, elevation_deg: f64) -> Vec<S> {
        match self.db.kind {
            HrirDatabaseKind::Kemar => self.nearest_kemar(ear, azimuth_deg, elevation_deg),
            HrirDatabaseKind::Cipic => self.nearest_cipic(ear, azimuth_deg, elevation_deg),
        }
    }

    fn nearest_kemar(&self, ear: Ear, azimuth_deg: f64, elevation_deg: f64) -> Vec<S> {
        let elevation_index = kemar_elevation_index(elevation_deg);
        let count = KEMAR_AZIMUTH_COUNTS[elevation_index];
        let (half_index, swap) = kemar_azimuth_index(azimuth_deg, count);
        let effective_ear = if swap { swap_ear(ear) } else { ear };
        let table = match effective_ear {
            Ear::Left => &self.db.left,
            Ear::Right => &self.db.right,
        };
        table.taps[elevation_index][half_index].iter().copied().map(S::from_f64).collect()
    }

    fn nearest_cipic(&self, ear: Ear, azimuth_deg: f64, elevation_deg: f64) -> Vec<S> {
        let azimuth_index = cipic_azimuth_index(azimuth_deg);
        let elevation_index = cipic_elevation_index(elevation_deg);
        let table = match ear {
            Ear::Left => &self.db.left,
            Ear::Right => &self.db.right,
        };
        table.taps[elevation_index][azimuth_index].iter().copied().map(S::from_f64).collect()
    }
}

fn swap_ear(ear: Ear) -> Ear {
    match ear {
        Ear::Left => Ear::Right,
        Ear::Right => Ear::Left,
    }
}

fn kemar_elevation_index(elevation_deg: f64) -> usize {
    let idx = ((elevation_deg + 40.0) / 10.0).round();
    idx.clamp(0.0, (KEMAR_ELEVATIONS.len() - 1) as f64) as usize
}

/// Returns `(stored_index, swap_ears)`: only azimuths in `[0, 180]` are
/// stored on disk; a request beyond 180 degrees is served by the mirrored
/// index with the ears swapped.
fn kemar_azimuth_index(azimuth_deg: f64, count: usize) -> (usize, bool) {
    if count <= 1 {
        return (0, false);
    }
    let step = 360.0 / count as f64;
    let n = (azimuth_deg.rem_euclid(360.0) / step).round() as usize % count;
    if n * 2 <= count {
        (n, false)
    } else {
        (count - n, true)
    }
}

fn cipic_azimuth_index(azimuth_deg: f64) -> usize {
    let mut best = 0;
    let mut best_diff = f64::MAX;
    for (i, &a) in CIPIC_AZIMUTHS_DEG.iter().enumerate() {
        let diff = (a - azimuth_deg).abs();
        if diff < best_diff {
            best_diff = diff;
            best = i;
        }
    }
    best
}

fn cipic_elevation_index(elevation_deg: f64) -> usize {
    let idx = ((elevation_deg - CIPIC_ELEVATION_START_DEG) / CIPIC_ELEVATION_SPACING_DEG).round();
    idx.clamp(0.0, (CIPIC_NUM_ELEVATIONS - 1) as f64) as usize
}

fn load_database(
    kind: HrirDatabaseKind,
    directory: &Path,
    sampling_frequency: f64,
    hrir_length: usize,
) -> Result<LoadedDatabase> {
    if !directory.exists() {
        return Err(SimError::HrirDatabaseNotFound(directory.display().to_string()));
    }
    if !directory.is_dir() || fs::read_dir(directory).is_err() {
        return Err(SimError::HrirDatabaseUnreadable(directory.display().to_string()));
    }

    match kind {
        HrirDatabaseKind::Kemar => load_kemar(directory, sampling_frequency, hrir_length),
        HrirDatabaseKind::Cipic => load_cipic(directory, sampling_frequency, hrir_length),
    }
}

fn load_kemar(directory: &Path, sampling_frequency: f64, hrir_length: usize) -> Result<LoadedDatabase> {
    let native_fs = 44100.0;
    let mut left_taps = Vec::with_capacity(KEMAR_ELEVATIONS.len());
    let mut right_taps = Vec::with_capacity(KEMAR_ELEVATIONS.len());

    for (elevation_index, &elevation) in KEMAR_ELEVATIONS.iter().enumerate() {
        let count = KEMAR_AZIMUTH_COUNTS[elevation_index];
        let stored_count = count / 2 + 1;
        let mut left_row = Vec::with_capacity(stored_count);
        let mut right_row = Vec::with_capacity(stored_count);

        for stored_index in 0..stored_count {
            let azimuth = (stored_index as f64 * 360.0 / count as f64).round() as i64;
            let path = kemar_file_path(directory, elevation, azimuth);
            let (left, right) = read_kemar_stereo_file(&path)?;
            left_row.push(finish_kemar_channel(left, sampling_frequency, native_fs, hrir_length));
            right_row.push(finish_kemar_channel(right, sampling_frequency, native_fs, hrir_length));
        }

        left_taps.push(left_row);
        right_taps.push(right_row);
    }

    Ok(LoadedDatabase {
        kind: HrirDatabaseKind::Kemar,
        sampling_frequency,
        hrir_length,
        left: EarTable { taps: left_taps },
        right: EarTable { taps: right_taps },
    })
}

fn finish_kemar_channel(raw: Vec<f64>, sampling_frequency: f64, native_fs: f64, hrir_length: usize) -> Vec<f64> {
    let mut samples = if (sampling_frequency - native_fs).abs() < 1.0 {
        raw
    } else {
        super::butterworth::downsample_by_half(&raw, native_fs)
    };
    samples.resize(hrir_length, 0.0);
    samples
}

fn kemar_file_path(directory: &Path, elevation: i32, azimuth: i64) -> PathBuf {
    directory.join(format!("elev{elevation}")).join(format!("H{elevation}e{azimuth:03}a.dat"))
}

fn read_kemar_stereo_file(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let bytes = fs::read(path).map_err(|e| SimError::MalformedHrirFile(path.display().to_string(), e.to_string()))?;
    if bytes.len() % 4 != 0 {
        return Err(SimError::MalformedHrirFile(
            path.display().to_string(),
            "stereo 16-bit file length not a multiple of 4 bytes".to_string(),
        ));
    }
    let mut left = Vec::with_capacity(bytes.len() / 4);
    let mut right = Vec::with_capacity(bytes.len() / 4);
    for frame in bytes.chunks_exact(4) {
        let l = i16::from_be_bytes([frame[0], frame[1]]);
        let r = i16::from_be_bytes([frame[2], frame[3]]);
        left.push(l as f64 / KEMAR_NORMALISATION);
        right.push(r as f64 / KEMAR_NORMALISATION);
    }
    Ok((left, right))
}

fn load_cipic(directory: &Path, sampling_frequency: f64, hrir_length: usize) -> Result<LoadedDatabase> {
    let mut left_taps = Vec::with_capacity(CIPIC_NUM_ELEVATIONS);
    let mut right_taps = Vec::with_capacity(CIPIC_NUM_ELEVATIONS);

    for _ in 0..CIPIC_NUM_ELEVATIONS {
        left_taps.push(vec![Vec::new(); CIPIC_AZIMUTHS_DEG.len()]);
        right_taps.push(vec![Vec::new(); CIPIC_AZIMUTHS_DEG.len()]);
    }

    for (az_index, &azimuth) in CIPIC_AZIMUTHS_DEG.iter().enumerate() {
        let left_path = cipic_file_path(directory, azimuth, Ear::Left);
        let right_path = cipic_file_path(directory, azimuth, Ear::Right);
        let left_rows = read_cipic_file(&left_path, hrir_length)?;
        let right_rows = read_cipic_file(&right_path, hrir_length)?;
        for elevation_index in 0..CIPIC_NUM_ELEVATIONS {
            left_taps[elevation_index][az_index] = left_rows.get(elevation_index).cloned().unwrap_or_default();
            right_taps[elevation_index][az_index] = right_rows.get(elevation_index).cloned().unwrap_or_default();
        }
    }

    Ok(LoadedDatabase {
        kind: HrirDatabaseKind::Cipic,
        sampling_frequency,
        hrir_length,
        left: EarTable { taps: left_taps },
        right: EarTable { taps: right_taps },
    })
}

fn cipic_file_path(directory: &Path, azimuth: f64, ear: Ear) -> PathBuf {
    let ear_name = match ear {
        Ear::Left => "left",
        Ear::Right => "right",
    };
    let label = if azimuth < 0.0 { format!("neg{}az{ear_name}", -azimuth as i64) } else { format!("{}az{ear_name}", azimuth as i64) };
    directory.join(format!("{label}.txt"))
}

/// Read a CIPIC `.txt` file (one elevation's HRIR per line, whitespace
/// separated taps) or its `.wav` counterpart (one measurement per channel,
/// requiring the transpose the spec calls out).
fn read_cipic_file(path: &Path, hrir_length: usize) -> Result<Vec<Vec<f64>>> {
    if path.exists() {
        let text = fs::read_to_string(path).map_err(|e| SimError::MalformedHrirFile(path.display().to_string(), e.to_string()))?;
        let mut rows = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut row: Vec<f64> = trimmed
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>()
                        .map_err(|e| SimError::MalformedHrirFile(path.display().to_string(), e.to_string()))
                })
                .collect::<Result<Vec<_>>>()?;
            row.resize(hrir_length, 0.0);
            rows.push(row);
        }
        return Ok(rows);
    }

    let wav_path = path.with_extension("wav");
    if wav_path.exists() {
        return read_cipic_wav(&wav_path, hrir_length);
    }

    Err(SimError::HrirDatabaseNotFound(path.display().to_string()))
}

/// CIPIC's WAV encoding stores the BRIR across 200 channels, one sample per
/// channel per measurement (elevation); each decoded frame is therefore one
/// measurement's impulse response laid out channel-major, so we transpose
/// frame-of-channels into per-elevation tap vectors.
fn read_cipic_wav(path: &Path, hrir_length: usize) -> Result<Vec<Vec<f64>>> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| SimError::MalformedHrirFile(path.display().to_string(), e.to_string()))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    let samples: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f64 / i32::MAX as f64))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| SimError::MalformedHrirFile(path.display().to_string(), e.to_string()))?,
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| SimError::MalformedHrirFile(path.display().to_string(), e.to_string()))?,
    };
    let frames = samples.len() / channels.max(1);
    let mut rows = vec![Vec::with_capacity(channels); frames];
    for (i, &s) in samples.iter().enumerate() {
        let frame = i / channels;
        if frame < rows.len() {
            rows[frame].push(s);
        }
    }
    for row in &mut rows {
        row.resize(hrir_length, 0.0);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_sampling_frequency_passes_through_supported_rates() {
        assert_eq!(resolve_sampling_frequency(44100.0), 44100.0);
        assert_eq!(resolve_sampling_frequency(22050.0), 22050.0);
    }

    #[test]
    fn resolve_sampling_frequency_falls_back_to_44_1k_for_unsupported_rates() {
        assert_eq!(resolve_sampling_frequency(48000.0), FALLBACK_SAMPLE_RATE);
    }

    #[test]
    fn load_database_missing_directory_is_not_found() {
        let err = load_database(HrirDatabaseKind::Kemar, Path::new("/nonexistent/hrir/dir"), 44100.0, 64).unwrap_err();
        assert!(matches!(err, SimError::HrirDatabaseNotFound(_)));
    }

    #[test]
    fn load_database_present_non_directory_is_unreadable() {
        let file = std::env::temp_dir().join("aural_hrir_database_is_a_file_not_a_dir");
        std::fs::write(&file, b"not a directory").unwrap();
        let err = load_database(HrirDatabaseKind::Kemar, &file, 44100.0, 64).unwrap_err();
        std::fs::remove_file(&file).unwrap();
        assert!(matches!(err, SimError::HrirDatabaseUnreadable(_)));
    }
}
