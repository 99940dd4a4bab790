use hough_lines::IntensityGrid;

pub const BRIGHT: u32 = 765;
pub const DARK: u32 = 0;

/// Bright grid with dark pixels wherever `dark(x, y)` holds.
pub fn grid_with<F>(width: u32, height: u32, dark: F) -> IntensityGrid
where
    F: Fn(u32, u32) -> bool,
{
    IntensityGrid::from_fn(width, height, |x, y| if dark(x, y) { DARK } else { BRIGHT })
}
