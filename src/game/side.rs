use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Cross,
    Naught,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Cross => Side::Naught,
            Side::Naught => Side::Cross,
        }
    }

    /// Convert side to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Side::Cross => Cell::Cross,
            Side::Naught => Cell::Naught,
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Side::Cross => "Cross",
            Side::Naught => "Naught",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_side() {
        assert_eq!(Side::Cross.other(), Side::Naught);
        assert_eq!(Side::Naught.other(), Side::Cross);
    }

    #[test]
    fn test_side_cells() {
        assert_eq!(Side::Cross.to_cell(), Cell::Cross);
        assert_eq!(Side::Naught.to_cell(), Cell::Naught);
        assert_eq!(Side::Naught.name(), "Naught");
    }
}
