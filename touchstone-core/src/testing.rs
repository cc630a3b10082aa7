//! Simulated switches and motion for unit tests

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use crate::endstop::{EndstopMonitor, SwitchId};
use crate::measure::stats::abs;
use crate::motion::{Axis, Direction, AXIS_COUNT};
use crate::traits::{LinearScale, MotionFault, MoveEnd, Mover, SwitchSensor};

pub const X_MIN: SwitchId = SwitchId::axis_limit("x-min", Axis::X, Direction::Negative);
pub const X_MAX: SwitchId = SwitchId::axis_limit("x-max", Axis::X, Direction::Positive);
pub const Y_MIN: SwitchId = SwitchId::axis_limit("y-min", Axis::Y, Direction::Negative);
pub const XY_BACK: SwitchId = SwitchId::auxiliary("xy-back", Axis::Y, Direction::Positive);
pub const Z_TOP: SwitchId = SwitchId::axis_limit("z-top", Axis::Z, Direction::Positive);
pub const TOOL_CONTACT: SwitchId =
    SwitchId::auxiliary("tool-contact", Axis::Z, Direction::Negative);

const STEPS_PER_MM: f64 = 1000.0;

/// One step per unit
pub fn unit_scale() -> LinearScale {
    LinearScale::uniform(1.0)
}

/// Sensor whose levels are set directly by the test
#[derive(Default)]
pub struct ManualSensor {
    closed: RefCell<Vec<SwitchId>>,
}

impl ManualSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, switch: SwitchId, contact: bool) {
        let mut closed = self.closed.borrow_mut();
        closed.retain(|s| *s != switch);
        if contact {
            closed.push(switch);
        }
    }
}

impl SwitchSensor for ManualSensor {
    fn is_contact(&self, switch: SwitchId) -> bool {
        self.closed.borrow().contains(&switch)
    }
}

/// A switch closed over a window of raw step positions
pub struct SimSwitch {
    id: SwitchId,
    lo: i32,
    hi: i32,
    noise: i32,
    wander: &'static [i32],
}

impl SimSwitch {
    /// Closed for steps in `lo..=hi`
    pub fn new(id: SwitchId, lo: i32, hi: i32) -> Self {
        Self {
            id,
            lo,
            hi,
            noise: 0,
            wander: &[0],
        }
    }

    /// Chatter for `steps` outside the window on the approach side
    pub fn with_noise(mut self, steps: i32) -> Self {
        self.noise = steps;
        self
    }

    /// Shift the window by these offsets on successive approaches
    pub fn with_wander(mut self, offsets: &'static [i32]) -> Self {
        self.wander = offsets;
        self
    }

    fn window(&self, approach: usize) -> (i32, i32) {
        let shift = match self.wander.len() {
            0 => 0,
            len => self.wander[approach.saturating_sub(1) % len],
        };
        (self.lo + shift, self.hi + shift)
    }
}

/// Machine with step counters and simulated switches
///
/// Noise-band reads alternate on the global read counter, so a noisy
/// switch never produces two consecutive contact samples there.
pub struct SimMachine {
    switches: Vec<SimSwitch>,
    steps: Cell<[i32; AXIS_COUNT]>,
    reads: Cell<u32>,
    approaches: Cell<usize>,
    last_travel: Cell<i32>,
    scale: LinearScale,
}

impl SimMachine {
    pub fn new(switches: Vec<SimSwitch>) -> Self {
        Self {
            switches,
            steps: Cell::new([0; AXIS_COUNT]),
            reads: Cell::new(0),
            approaches: Cell::new(0),
            last_travel: Cell::new(0),
            scale: LinearScale::uniform(STEPS_PER_MM),
        }
    }

    pub fn steps(&self, axis: Axis) -> i32 {
        self.steps.get()[axis.index()]
    }

    pub fn set_steps(&self, axis: Axis, steps: i32) {
        let mut all = self.steps.get();
        all[axis.index()] = steps;
        self.steps.set(all);
    }

    /// Number of bounded approaches started
    pub fn approaches(&self) -> usize {
        self.approaches.get()
    }

    /// Step bound of the most recent approach
    pub fn last_travel_steps(&self) -> i32 {
        self.last_travel.get()
    }

    fn step(&self, axis: Axis, direction: Direction) -> i32 {
        let delta = match direction {
            Direction::Positive => 1,
            Direction::Negative => -1,
        };
        let at = self.steps(axis) + delta;
        self.set_steps(axis, at);
        at
    }

    fn position(&self, axis: Axis) -> f64 {
        self.steps(axis) as f64 / STEPS_PER_MM
    }
}

impl SwitchSensor for SimMachine {
    fn is_contact(&self, switch: SwitchId) -> bool {
        let reads = self.reads.get().wrapping_add(1);
        self.reads.set(reads);

        let Some(sim) = self.switches.iter().find(|s| s.id == switch) else {
            return false;
        };
        let at = self.steps(switch.axis);
        let (lo, hi) = sim.window(self.approaches.get());
        if (lo..=hi).contains(&at) {
            return true;
        }
        let in_band = match switch.approach {
            Direction::Positive => (lo - sim.noise..lo).contains(&at),
            Direction::Negative => (hi + 1..=hi + sim.noise).contains(&at),
        };
        in_band && reads % 2 == 0
    }
}

fn to_steps(distance: f64) -> i32 {
    (abs(distance) * STEPS_PER_MM + 0.5) as i32
}

/// Mover that steps the simulated machine through the monitor
pub struct SimMover<'a, const N: usize> {
    machine: &'a SimMachine,
    monitor: &'a EndstopMonitor<N>,
}

impl<'a, const N: usize> SimMover<'a, N> {
    pub fn new(machine: &'a SimMachine, monitor: &'a EndstopMonitor<N>) -> Self {
        Self { machine, monitor }
    }

    fn step(&self, axis: Axis, direction: Direction) -> bool {
        let at = self.machine.step(axis, direction);
        self.monitor
            .on_step(axis, direction, at, self.machine, &self.machine.scale)
    }
}

impl<const N: usize> Mover for SimMover<'_, N> {
    fn move_until_triggered(
        &mut self,
        axis: Axis,
        direction: Direction,
        _speed: f64,
        max_travel: f64,
    ) -> Result<MoveEnd, MotionFault> {
        let limit = to_steps(max_travel);
        self.machine.approaches.set(self.machine.approaches.get() + 1);
        self.machine.last_travel.set(limit);

        for _ in 0..limit {
            if self.step(axis, direction) {
                return Ok(MoveEnd::Triggered {
                    position: self.machine.position(axis),
                });
            }
        }
        Ok(MoveEnd::Exhausted {
            position: self.machine.position(axis),
        })
    }

    fn move_by(&mut self, axis: Axis, distance: f64, _speed: f64) -> Result<f64, MotionFault> {
        let direction = Direction::of(distance);
        for _ in 0..to_steps(distance) {
            if self.step(axis, direction) {
                return Err(MotionFault::Blocked);
            }
        }
        Ok(self.machine.position(axis))
    }

    fn current_position(&self, axis: Axis) -> f64 {
        self.machine.position(axis)
    }

    fn raw_step_position(&self, axis: Axis) -> i32 {
        self.machine.steps(axis)
    }

    fn step_distance(&self, axis: Axis) -> f64 {
        self.machine.scale.step_distance(axis)
    }
}
