use crate::error::{LifeError, Result};

const DEFAULT_WIDTH: u32 = 960;
const DEFAULT_HEIGHT: u32 = 960;
const DEFAULT_CELL_SIZE: u32 = 6;

const DEFAULT_RATE: u32 = 12;
const DEFAULT_RATE_FLOOR: u32 = 5;
const DEFAULT_RATE_STEP: u32 = 2;

/// Pixel size of the drawing area and of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl Viewport {
    /// Number of whole cells that fit the viewport, as `(rows, cols)`.
    pub fn grid_dimensions(&self) -> Result<(usize, usize)> {
        if self.cell_size == 0 {
            return Err(LifeError::Config("cell size must be positive".into()));
        }
        let rows = (self.height / self.cell_size) as usize;
        let cols = (self.width / self.cell_size) as usize;
        if rows == 0 || cols == 0 {
            return Err(LifeError::Config(format!(
                "a {}x{} viewport cannot hold a single {}px cell",
                self.width, self.height, self.cell_size
            )));
        }
        Ok((rows, cols))
    }
}

/// Chance of a cell coming up alive when the grid is randomized.
///
/// A uniform draw in `[0, denominator)` makes the cell alive iff it equals
/// `numerator`, so the live fraction is `1 / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    numerator: u32,
    denominator: u32,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            numerator: 1,
            denominator: 4,
        }
    }
}

impl Density {
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if denominator == 0 {
            return Err(LifeError::Config("density denominator must be positive".into()));
        }
        if numerator >= denominator {
            return Err(LifeError::Config(format!(
                "density numerator {numerator} can never be drawn from [0, {denominator})"
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }
}

/// Tick rate settings handed to the frame scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedConfig {
    initial_rate: u32,
    floor: u32,
    step: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            initial_rate: DEFAULT_RATE,
            floor: DEFAULT_RATE_FLOOR,
            step: DEFAULT_RATE_STEP,
        }
    }
}

impl SpeedConfig {
    pub fn new(initial_rate: u32, floor: u32, step: u32) -> Result<Self> {
        if initial_rate < floor {
            return Err(LifeError::Config(format!(
                "initial rate {initial_rate} is below the floor of {floor}"
            )));
        }
        Ok(Self {
            initial_rate,
            floor,
            step,
        })
    }

    pub fn initial_rate(&self) -> u32 {
        self.initial_rate
    }

    /// Lowest rate a decrement may reach.
    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// Amount one "faster"/"slower" command moves the rate by.
    pub fn step(&self) -> u32 {
        self.step
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifeConfig {
    pub viewport: Viewport,
    pub density: Density,
    pub speed: SpeedConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_viewport_is_160_by_160() {
        assert_eq!(Viewport::default().grid_dimensions(), Ok((160, 160)));
    }

    #[test]
    fn partial_cells_are_dropped() {
        let viewport = Viewport {
            width: 65,
            height: 31,
            cell_size: 10,
        };
        assert_eq!(viewport.grid_dimensions(), Ok((3, 6)));
    }

    #[test]
    fn degenerate_viewports_are_rejected() {
        let no_cell_size = Viewport {
            cell_size: 0,
            ..Viewport::default()
        };
        assert!(matches!(no_cell_size.grid_dimensions(), Err(LifeError::Config(_))));

        let too_small = Viewport {
            width: 5,
            height: 960,
            cell_size: 6,
        };
        assert!(matches!(too_small.grid_dimensions(), Err(LifeError::Config(_))));
    }

    #[test]
    fn density_must_be_drawable() {
        assert!(Density::new(0, 1).is_ok());
        assert!(matches!(Density::new(0, 0), Err(LifeError::Config(_))));
        assert!(matches!(Density::new(4, 4), Err(LifeError::Config(_))));
        assert_eq!(Density::default(), Density::new(1, 4).unwrap());
    }

    #[test]
    fn initial_rate_respects_floor() {
        assert!(SpeedConfig::new(5, 5, 2).is_ok());
        assert!(matches!(SpeedConfig::new(4, 5, 2), Err(LifeError::Config(_))));
    }
}
