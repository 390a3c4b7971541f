mod render;
mod type_expr;

pub use render::*;
pub use type_expr::*;
