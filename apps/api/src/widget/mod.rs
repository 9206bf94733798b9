// Widget flow: quiz screen rendering, contact screen gating, and submission.
// Presentation-free; a `Renderer` implementation does the actual drawing.

pub mod controller;
pub mod render;
