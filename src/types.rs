/// Where the session is in its run/lost/restart cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    Running,
    Lost,
}

/// The two logical signals the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSignal {
    Jump,
    Quit,
}

/// What the session wants the frame loop to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Things that happened during one tick, for logging and effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub scored: bool,
    pub collided: bool,
    pub landed: bool,
}

/// Integer pixel offset of one mask's top-left relative to another's.
pub type Offset = (i32, i32);
