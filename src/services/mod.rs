/// Drink dispenser controller: pour and light phases.
pub mod dispenser;
/// Terminal rendering of scenes.
pub mod display;
/// Fixed-rate frame loop and keyboard input.
pub mod game_loop;
/// Relay boards (sysfs GPIO or simulated).
pub mod relay;
/// Single-shot tasks due on the game clock.
pub mod scheduler;
