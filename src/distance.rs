/// Levenshtein distance between `a` and `b` with unit costs.
///
/// Works on `char`s, so multi-byte input is measured per scalar value rather
/// than per byte. Uses the full `(|a|+1) x (|b|+1)` table.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (rows, cols) = (a.len() + 1, b.len() + 1);

    let mut matrix = vec![vec![0usize; cols]; rows];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..rows {
        for j in 1..cols {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let del = matrix[i - 1][j] + 1;
            let ins = matrix[i][j - 1] + 1;
            let sub = matrix[i - 1][j - 1] + cost;
            matrix[i][j] = del.min(ins).min(sub);
        }
    }
    matrix[rows - 1][cols - 1]
}
