use crate::config::{Density, LifeConfig, SpeedConfig};
use crate::error::Result;
use crate::grid::{CellState, Grid};
use crate::stepper::GenerationStepper;
use rand::Rng;

/// Owns the grid and the run/pause state machine.
///
/// Starts paused. Grid edits (randomize, clear, set) only apply while
/// paused and generations only advance while running; commands that are not
/// allowed in the current state are ignored.
#[derive(Debug)]
pub struct SimulationController {
    grid: Grid,
    stepper: GenerationStepper,
    density: Density,
    speed: SpeedConfig,
    running: bool,
    target_rate: u32,
    generation: u64,
}

impl SimulationController {
    /// A paused, empty `rows` x `cols` simulation with default settings.
    pub fn init(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::with_grid(
            Grid::new(rows, cols)?,
            Density::default(),
            SpeedConfig::default(),
        ))
    }

    pub fn from_config(config: &LifeConfig) -> Result<Self> {
        let (rows, cols) = config.viewport.grid_dimensions()?;
        Ok(Self::with_grid(Grid::new(rows, cols)?, config.density, config.speed))
    }

    pub fn with_grid(grid: Grid, density: Density, speed: SpeedConfig) -> Self {
        log::debug!(
            "simulation ready: {}x{} grid, {} ticks/s",
            grid.rows(),
            grid.cols(),
            speed.initial_rate()
        );
        Self {
            grid,
            stepper: GenerationStepper::new(),
            density,
            speed,
            running: false,
            target_rate: speed.initial_rate(),
            generation: 0,
        }
    }

    pub fn toggle_run(&mut self) {
        self.running = !self.running;
        log::debug!(
            "simulation {} at generation {}",
            if self.running { "running" } else { "paused" },
            self.generation
        );
    }

    /// Re-rolls the grid from the thread-local RNG. Ignored while running.
    pub fn request_randomize(&mut self) {
        self.request_randomize_with(&mut rand::rng());
    }

    pub fn request_randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.running {
            return;
        }
        self.grid.randomize_with(self.density, rng);
        log::debug!("grid randomized, population {}", self.grid.population());
    }

    /// Kills every cell. Ignored while running.
    pub fn request_clear(&mut self) {
        if self.running {
            return;
        }
        self.grid.clear();
        log::debug!("grid cleared");
    }

    /// Edits a single cell. Ignored while running, but out-of-range
    /// coordinates are still reported.
    pub fn request_set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        if self.running {
            self.grid.get(row, col)?;
            return Ok(());
        }
        self.grid.set(row, col, state)
    }

    /// Moves the target rate by `delta` ticks per second. A decrement that
    /// would drop below the configured floor is discarded.
    pub fn adjust_speed(&mut self, delta: i32) {
        let requested = i64::from(self.target_rate) + i64::from(delta);
        if requested < i64::from(self.speed.floor()) {
            return;
        }
        if let Ok(rate) = u32::try_from(requested) {
            self.target_rate = rate;
            log::debug!("target rate now {rate} ticks/s");
        }
    }

    /// `adjust_speed` by one configured step.
    pub fn faster(&mut self) {
        self.adjust_speed(self.speed_step());
    }

    pub fn slower(&mut self) {
        self.adjust_speed(-self.speed_step());
    }

    /// Advances one generation if running. Returns whether the grid changed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let changed = self.stepper.step(&mut self.grid);
        self.generation += 1;
        log::trace!("generation {} (changed: {changed})", self.generation);
        changed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_rate(&self) -> u32 {
        self.target_rate
    }

    /// Generations advanced since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cell_state(&self, row: usize, col: usize) -> Result<CellState> {
        self.grid.get(row, col)
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.grid.cells()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn speed_step(&self) -> i32 {
        i32::try_from(self.speed.step()).unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::grid::CellState::{Alive, Dead};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller(rows: usize, cols: usize) -> SimulationController {
        SimulationController::init(rows, cols).unwrap()
    }

    #[test]
    fn starts_paused_at_default_rate() {
        let sim = controller(4, 4);
        assert!(!sim.is_running());
        assert_eq!(sim.current_rate(), 12);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn init_rejects_empty_grid() {
        assert!(matches!(SimulationController::init(0, 3), Err(LifeError::Config(_))));
    }

    #[test]
    fn from_config_derives_dimensions_from_viewport() {
        let sim = SimulationController::from_config(&LifeConfig::default()).unwrap();
        assert_eq!((sim.grid().rows(), sim.grid().cols()), (160, 160));
    }

    #[test]
    fn toggle_run_flips_state() {
        let mut sim = controller(4, 4);
        sim.toggle_run();
        assert!(sim.is_running());
        sim.toggle_run();
        assert!(!sim.is_running());
    }

    #[test]
    fn tick_is_a_no_op_while_paused() {
        let mut sim = controller(5, 5);
        sim.request_set(2, 2, Alive).unwrap();
        assert!(!sim.tick());
        assert_eq!(sim.cell_state(2, 2), Ok(Alive));
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn tick_advances_while_running() {
        let mut sim = controller(5, 5);
        sim.request_set(2, 2, Alive).unwrap();
        sim.toggle_run();
        assert!(sim.tick());
        assert_eq!(sim.cell_state(2, 2), Ok(Dead));
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn randomize_only_while_paused() {
        let mut sim = controller(20, 20);
        let mut rng = StdRng::seed_from_u64(11);
        sim.toggle_run();
        sim.request_randomize_with(&mut rng);
        assert_eq!(sim.grid().population(), 0);

        sim.toggle_run();
        sim.request_randomize_with(&mut rng);
        assert!(sim.grid().population() > 0);
    }

    #[test]
    fn set_while_running_is_ignored_but_still_range_checked() {
        let mut sim = controller(3, 3);
        sim.toggle_run();
        assert_eq!(sim.request_set(1, 1, Alive), Ok(()));
        assert_eq!(sim.cell_state(1, 1), Ok(Dead));
        assert!(matches!(sim.request_set(3, 1, Alive), Err(LifeError::Index { .. })));
    }

    #[test]
    fn cell_state_reports_out_of_range() {
        let sim = controller(3, 4);
        assert!(matches!(sim.cell_state(0, 4), Err(LifeError::Index { .. })));
    }

    #[test]
    fn speed_steps_follow_config() {
        let speed = SpeedConfig::new(9, 5, 3).unwrap();
        let mut sim = SimulationController::with_grid(Grid::new(2, 2).unwrap(), Density::default(), speed);
        sim.faster();
        assert_eq!(sim.current_rate(), 12);
        sim.slower();
        sim.slower();
        assert_eq!(sim.current_rate(), 6);
        sim.slower();
        assert_eq!(sim.current_rate(), 6);
    }

    #[test]
    fn speed_can_land_exactly_on_floor() {
        let mut sim = controller(2, 2);
        sim.adjust_speed(-7);
        assert_eq!(sim.current_rate(), 5);
        sim.adjust_speed(-1);
        assert_eq!(sim.current_rate(), 5);
    }
}
