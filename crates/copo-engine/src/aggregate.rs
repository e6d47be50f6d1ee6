use copo_model::{MappingMatrix, PO_COUNT};

/// Mean of each of the 15 columns over the six CO rows.
pub fn column_averages(matrix: &MappingMatrix) -> [f64; PO_COUNT] {
    let mut averages = [0.0; PO_COUNT];
    let means = column_means(matrix.rows(), PO_COUNT);
    averages.copy_from_slice(&means);
    averages
}

/// Column means over any number of rows. Short rows count their missing
/// cells as 0; with no rows every mean is 0.
pub fn column_means<R: AsRef<[f64]>>(rows: &[R], width: usize) -> Vec<f64> {
    if rows.is_empty() {
        return vec![0.0; width];
    }
    let count = rows.len() as f64;
    (0..width)
        .map(|col| {
            let sum: f64 = rows
                .iter()
                .filter_map(|row| row.as_ref().get(col))
                .sum();
            sum / count
        })
        .collect()
}
