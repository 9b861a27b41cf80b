use serde::Serialize;

/// Min/max envelope of one horizontal column of the waveform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WaveformColumn {
    pub min: f32,
    pub max: f32,
}

/// Downsample samples into exactly `column_count` min/max columns.
///
/// Windows are `ceil(len / column_count)` samples wide, so trailing windows can be short or
/// empty. Empty windows produce the default column.
pub fn render_columns(samples: &[f32], column_count: usize) -> Vec<WaveformColumn> {
    if column_count == 0 {
        return Vec::new();
    }

    let window = samples.len().div_ceil(column_count);

    (0..column_count)
        .map(|column| {
            let start = (column * window).min(samples.len());
            let end = (start + window).min(samples.len());
            let slice = &samples[start..end];

            match slice.split_first() {
                None => WaveformColumn::default(),
                Some((&first, rest)) => rest.iter().fold(
                    WaveformColumn {
                        min: first,
                        max: first,
                    },
                    |acc, &sample| WaveformColumn {
                        min: acc.min.min(sample),
                        max: acc.max.max(sample),
                    },
                ),
            }
        })
        .collect()
}

/// Render columns as a single line of block characters, scaled to the loudest column.
pub fn render_ascii(columns: &[WaveformColumn]) -> String {
    const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    let peak = columns
        .iter()
        .map(|c| c.max.abs().max(c.min.abs()))
        .fold(0.0_f32, f32::max);

    columns
        .iter()
        .map(|c| {
            if peak <= 0.0 {
                return LEVELS[0];
            }
            let amplitude = c.max.abs().max(c.min.abs()) / peak;
            let level = (amplitude * (LEVELS.len() - 1) as f32).round() as usize;
            LEVELS[level.min(LEVELS.len() - 1)]
        })
        .collect()
}
