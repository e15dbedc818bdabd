//! SpO2 and heart-rate estimation
//!
//! Ratio-of-ratios pulse oximetry over a fixed window of red/IR FIFO
//! samples. The IR signal is inverted and smoothed, pulse valleys are found
//! as peaks of the inverted signal (closely spaced candidates are removed
//! after a descending sort by height), heart rate comes from the mean
//! valley-to-valley interval, and SpO2 from the median per-beat
//! AC/DC ratio looked up in a calibration table.
//!
//! Pure integer math on fixed-size buffers; no hardware involved.

/// Number of samples the estimator consumes (4 s at 25 sps)
pub const BUFFER_LEN: usize = 100;

/// Sample rate the window is assumed to be captured at
pub const SAMPLE_RATE_HZ: u32 = 25;

/// Sentinel returned for ratios outside the calibration table
pub const SPO2_INVALID: u8 = 255;

/// Upper bound on tracked pulse valleys per window
const MAX_PEAKS: usize = 15;

/// Minimum distance between accepted valleys, in samples
const MIN_PEAK_DISTANCE: i32 = 4;

/// SpO2 calibration table indexed by AC/DC ratio percentage
///
/// Empirical curve for the MAX30102 optics; the plateau at 100 covers the
/// ratio range of a healthy reading.
pub const SPO2_TABLE: [u8; 184] = [
    95, 95, 95, 96, 96, 96, 97, 97, 97, 97, 97, 98,
    98, 98, 98, 98, 99, 99, 99, 99, 99, 99, 99, 99,
    100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
    100, 100, 99, 99, 99, 99, 99, 99, 99, 99, 98, 98,
    98, 98, 98, 98, 97, 97, 97, 97, 96, 96, 96, 96,
    95, 95, 95, 94, 94, 94, 93, 93, 93, 92, 92, 92,
    91, 91, 90, 90, 89, 89, 89, 88, 88, 87, 87, 86,
    86, 85, 85, 84, 84, 83, 82, 82, 81, 81, 80, 80,
    79, 78, 78, 77, 76, 76, 75, 74, 74, 73, 72, 72,
    71, 70, 69, 69, 68, 67, 66, 66, 65, 64, 63, 62,
    62, 61, 60, 59, 58, 57, 56, 56, 55, 54, 53, 52,
    51, 50, 49, 48, 47, 46, 45, 44, 43, 42, 41, 40,
    39, 38, 37, 36, 35, 34, 33, 31, 30, 29, 28, 27,
    26, 25, 23, 22, 21, 20, 19, 17, 16, 15, 14, 12,
    11, 10, 9, 7, 6, 5, 3, 2, 1, 0, 0, 0,
    0, 0, 0, 0,
];

/// Estimation result for one sample window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Estimate {
    /// SpO2 percentage, or `SPO2_INVALID`
    pub spo2: u8,
    /// Whether `spo2` is usable
    pub spo2_valid: bool,
    /// Heart rate in beats per minute
    pub heart_rate: u16,
    /// Whether `heart_rate` is usable
    pub heart_rate_valid: bool,
}

/// Look up SpO2 for an AC/DC ratio percentage
///
/// Returns `SPO2_INVALID` (255) for ratios outside `[2, 184)`.
pub fn spo2_from_ratio(ratio: i32) -> u8 {
    if (2..SPO2_TABLE.len() as i32).contains(&ratio) {
        SPO2_TABLE[ratio as usize]
    } else {
        SPO2_INVALID
    }
}

/// Estimate SpO2 and heart rate from one window of red/IR samples
pub fn estimate(ir: &[u32; BUFFER_LEN], red: &[u32; BUFFER_LEN]) -> Estimate {
    // Remove the IR DC level and invert, so pulse valleys become peaks
    let ir_mean = (ir.iter().map(|&v| v as u64).sum::<u64>() / BUFFER_LEN as u64) as i32;
    let mut x = [0i32; BUFFER_LEN];
    for (dst, &v) in x.iter_mut().zip(ir.iter()) {
        *dst = ir_mean - v as i32;
    }

    // 4-point moving average
    for i in 0..BUFFER_LEN - 3 {
        x[i] = (x[i] + x[i + 1] + x[i + 2] + x[i + 3]) / 4;
    }
    let smoothed = &x[..BUFFER_LEN - 3];

    // Peak height threshold: signal mean clamped to a sane band
    let mean = (smoothed.iter().map(|&v| v as i64).sum::<i64>() / smoothed.len() as i64) as i32;
    let threshold = mean.clamp(30, 60);

    let mut locs = [0usize; MAX_PEAKS];
    let n_peaks = find_peaks(smoothed, threshold, MIN_PEAK_DISTANCE, &mut locs);

    let (heart_rate, heart_rate_valid) = if n_peaks >= 2 {
        let interval = (locs[n_peaks - 1] - locs[0]) / (n_peaks - 1);
        if interval > 0 {
            ((SAMPLE_RATE_HZ as usize * 60 / interval) as u16, true)
        } else {
            (0, false)
        }
    } else {
        (0, false)
    };

    // Ratio-of-ratios per valley-to-valley window
    let mut ratios = [0i32; MAX_PEAKS];
    let mut n_ratios = 0;
    for k in 0..n_peaks.saturating_sub(1) {
        let (a, b) = (locs[k], locs[k + 1]);
        if b <= a + 3 {
            continue;
        }

        let w_ir = &ir[a..b];
        let w_red = &red[a..b];
        let ir_max = i64::from(w_ir.iter().copied().max().unwrap_or(0));
        let ir_min = i64::from(w_ir.iter().copied().min().unwrap_or(0));
        let red_max = i64::from(w_red.iter().copied().max().unwrap_or(0));
        let red_min = i64::from(w_red.iter().copied().min().unwrap_or(0));

        let ir_ac = ir_max - ir_min;
        let red_ac = red_max - red_min;
        let denominator = ir_ac * red_max;
        if denominator > 0 {
            ratios[n_ratios] = ((red_ac * ir_max * 100) / denominator) as i32;
            n_ratios += 1;
            if n_ratios == MAX_PEAKS {
                break;
            }
        }
    }

    if n_ratios == 0 {
        return Estimate {
            spo2: SPO2_INVALID,
            spo2_valid: false,
            heart_rate,
            heart_rate_valid,
        };
    }

    ratios[..n_ratios].sort_unstable();
    let median = ratios[n_ratios / 2];
    let spo2 = spo2_from_ratio(median);

    Estimate {
        spo2,
        spo2_valid: spo2 != SPO2_INVALID,
        heart_rate,
        heart_rate_valid,
    }
}

/// Find peaks above `min_height`, at least `min_distance` apart
fn find_peaks(x: &[i32], min_height: i32, min_distance: i32, locs: &mut [usize; MAX_PEAKS]) -> usize {
    let n = peaks_above_min_height(x, min_height, locs);
    remove_close_peaks(x, locs, n, min_distance)
}

/// Collect local maxima above `min_height` (flat tops count once)
fn peaks_above_min_height(x: &[i32], min_height: i32, locs: &mut [usize; MAX_PEAKS]) -> usize {
    let mut n = 0;
    let mut i = 1;
    while i + 1 < x.len() {
        if x[i] > min_height && x[i] > x[i - 1] {
            let mut width = 1;
            while i + width < x.len() && x[i] == x[i + width] {
                width += 1;
            }
            if i + width < x.len() && x[i] > x[i + width] {
                if n == MAX_PEAKS {
                    break;
                }
                locs[n] = i;
                n += 1;
                i += width + 1;
            } else {
                i += width;
            }
        } else {
            i += 1;
        }
    }
    n
}

/// Drop peaks closer than `min_distance` to a taller one
///
/// Candidates are sorted by height descending, then each survivor removes
/// its near neighbours; the kept locations are re-sorted ascending.
fn remove_close_peaks(x: &[i32], locs: &mut [usize; MAX_PEAKS], n: usize, min_distance: i32) -> usize {
    sort_by_height_descending(x, &mut locs[..n]);

    let mut count = n as isize;
    let mut i: isize = -1;
    while i < count {
        let old_count = count;
        count = i + 1;
        let reference = if i == -1 { -1 } else { locs[i as usize] as i32 };
        for j in (i + 1)..old_count {
            let distance = locs[j as usize] as i32 - reference;
            if distance > min_distance || distance < -min_distance {
                locs[count as usize] = locs[j as usize];
                count += 1;
            }
        }
        i += 1;
    }

    locs[..count as usize].sort_unstable();
    count as usize
}

/// Insertion sort of peak indices by sample height, tallest first
fn sort_by_height_descending(x: &[i32], idx: &mut [usize]) {
    for i in 1..idx.len() {
        let moved = idx[i];
        let mut j = i;
        while j > 0 && x[moved] > x[idx[j - 1]] {
            idx[j] = idx[j - 1];
            j -= 1;
        }
        idx[j] = moved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic PPG: one pulse every 20 samples (75 bpm at 25 sps)
    fn synthetic_window() -> ([u32; BUFFER_LEN], [u32; BUFFER_LEN]) {
        let mut ir = [0u32; BUFFER_LEN];
        let mut red = [0u32; BUFFER_LEN];
        for i in 0..BUFFER_LEN {
            let phase = i % 20;
            let (ir_dip, red_dip) = match phase {
                5 => (200, 100),
                6 => (400, 200),
                7 => (600, 300),
                8 => (400, 200),
                9 => (200, 100),
                _ => (0, 0),
            };
            ir[i] = 100_000 - ir_dip;
            red[i] = 90_000 - red_dip;
        }
        (ir, red)
    }

    #[test]
    fn test_table_plateau_reads_100() {
        assert_eq!(spo2_from_ratio(24), 100);
        assert_eq!(spo2_from_ratio(30), 100);
        assert_eq!(spo2_from_ratio(37), 100);
    }

    #[test]
    fn test_table_bounds_return_sentinel() {
        assert_eq!(spo2_from_ratio(-1), SPO2_INVALID);
        assert_eq!(spo2_from_ratio(0), SPO2_INVALID);
        assert_eq!(spo2_from_ratio(1), SPO2_INVALID);
        assert_eq!(spo2_from_ratio(184), SPO2_INVALID);
        assert_eq!(spo2_from_ratio(1000), SPO2_INVALID);
        // First valid index
        assert_eq!(spo2_from_ratio(2), 95);
    }

    #[test]
    fn test_estimate_heart_rate() {
        let (ir, red) = synthetic_window();
        let estimate = estimate(&ir, &red);
        assert!(estimate.heart_rate_valid);
        assert_eq!(estimate.heart_rate, 75);
    }

    #[test]
    fn test_estimate_spo2() {
        let (ir, red) = synthetic_window();
        let estimate = estimate(&ir, &red);
        assert!(estimate.spo2_valid);
        // red_ac/red_dc = 300/90000, ir_ac/ir_dc = 600/100000 -> ratio 55
        assert_eq!(estimate.spo2, SPO2_TABLE[55]);
    }

    #[test]
    fn test_flat_signal_is_invalid() {
        let ir = [100_000u32; BUFFER_LEN];
        let red = [90_000u32; BUFFER_LEN];
        let estimate = estimate(&ir, &red);
        assert!(!estimate.heart_rate_valid);
        assert!(!estimate.spo2_valid);
        assert_eq!(estimate.spo2, SPO2_INVALID);
    }

    #[test]
    fn test_close_peaks_deduplicated() {
        // Two candidate peaks 2 samples apart; the taller must win
        let mut x = [0i32; 50];
        x[10] = 100;
        x[12] = 150;
        x[30] = 120;
        let mut locs = [0usize; MAX_PEAKS];
        let n = find_peaks(&x, 30, MIN_PEAK_DISTANCE, &mut locs);
        assert_eq!(n, 2);
        assert_eq!(&locs[..2], &[12, 30]);
    }
}
