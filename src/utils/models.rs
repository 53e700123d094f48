/// Vertical bar of the table
pub const BAR_V: char = '│';
/// Horizontal bar of the table
pub const BAR_H: char = '─';

/// Position for lines inside the table
pub enum Position {
    Top,
    Middle,
    Bottom,
}

impl Position {
    /// Left joint, middle joint and right joint of the line
    pub fn joints(&self) -> (char, char, char) {
        match self {
            Self::Top => ('┌', '┬', '┐'),
            Self::Middle => ('├', '┼', '┤'),
            Self::Bottom => ('└', '┴', '┘'),
        }
    }
}
