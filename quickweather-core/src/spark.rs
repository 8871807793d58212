//! Fixed-width sparkline quantizer for the hourly temperature strip.

/// Block glyphs ordered from lowest to highest visual weight.
pub const PALETTE: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Quantize `samples` into a string of exactly `width` palette glyphs.
///
/// Longer inputs are downsampled by nearest-index selection (a stride pick,
/// not an average); shorter inputs are right-padded with the last sample.
/// A flat series renders as the lowest glyph across the full width. Empty
/// input yields an empty string.
pub fn sparkline(samples: &[f64], width: usize) -> String {
    if samples.is_empty() || width == 0 {
        return String::new();
    }

    let vals: Vec<f64> = if samples.len() > width {
        (0..width).map(|i| samples[i * samples.len() / width]).collect()
    } else {
        let mut padded = samples.to_vec();
        padded.resize(width, samples[samples.len() - 1]);
        padded
    };

    let lo = vals.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if hi == lo {
        return PALETTE[0].to_string().repeat(width);
    }

    let top = (PALETTE.len() - 1) as f64;
    vals.iter()
        .map(|v| {
            let idx = ((v - lo) / (hi - lo) * top) as usize;
            PALETTE[idx.min(PALETTE.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(sparkline(&[], 24), "");
    }

    #[test]
    fn output_has_exact_width_and_palette_glyphs() {
        let samples = [3.0, -1.5, 7.2, 4.4, 0.0, 12.9, 8.8];
        for width in [1, 5, 7, 24, 36] {
            let out = sparkline(&samples, width);
            assert_eq!(out.chars().count(), width);
            assert!(out.chars().all(|c| PALETTE.contains(&c)));
        }
    }

    #[test]
    fn flat_series_is_all_lowest_glyph() {
        assert_eq!(sparkline(&[5.0], 4), "▁▁▁▁");
        assert_eq!(sparkline(&[2.5, 2.5, 2.5], 6), "▁▁▁▁▁▁");
    }

    #[test]
    fn downsamples_by_stride_selection() {
        // Indices picked for width 6 over 3 samples: 0,0,1,1,2,2.
        assert_eq!(sparkline(&[10.0, 20.0, 30.0], 6), "▁▁▄▄██");
    }

    #[test]
    fn pads_right_with_last_sample() {
        // Working set becomes [1, 2, 2, 2].
        assert_eq!(sparkline(&[1.0, 2.0], 4), "▁███");
    }

    #[test]
    fn invariant_under_positive_affine_rescale() {
        let samples = [1.0, 4.0, 2.0, 9.0, 9.0, 3.0];
        let rescaled: Vec<f64> = samples.iter().map(|v| v * 3.5 + 100.0).collect();
        assert_eq!(sparkline(&samples, 12), sparkline(&rescaled, 12));
    }

    #[test]
    fn extremes_map_to_first_and_last_glyph() {
        let out = sparkline(&[0.0, 10.0], 2);
        assert_eq!(out, "▁█");
    }
}
