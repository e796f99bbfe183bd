use quickcheck::{Arbitrary, Gen};

/// A well-formed startup block, plus the cell count it declares.
///
/// Neighbor slots are a mix of the sentinel and arbitrary in-range indices,
/// with no attempt at symmetry, since the raw data makes no such promise.
#[derive(Clone, Debug)]
pub struct StartupBlock {
    pub num_cells: usize,
    pub text: String,
}

impl Arbitrary for StartupBlock {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_cells = usize::arbitrary(g) % 64;
        let mut text = format!("{}\n", num_cells);
        for index in 0..num_cells {
            let richness = u8::arbitrary(g) % 4;
            text.push_str(&format!("{} {}", index, richness));
            for _ in 0..6 {
                if bool::arbitrary(g) {
                    text.push_str(" -1");
                } else {
                    text.push_str(&format!(" {}", usize::arbitrary(g) % num_cells));
                }
            }
            text.push('\n');
        }
        Self { num_cells, text }
    }
}
