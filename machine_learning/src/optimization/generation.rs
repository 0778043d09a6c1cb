/// Statistics of a single scored generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generation {
    /// How many generations were scored before this one.
    pub index: usize,
    /// Position of the selected model within the scored population.
    pub best_index: usize,
    pub best_error: f32,
    pub mean_error: f32,
}
