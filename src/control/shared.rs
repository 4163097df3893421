use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    control::message::{LevelCommand, LevelMessage, MessageReceiver},
    dsp::LevelState,
    io::parse_command,
    patch::LevelParams,
    Error,
};

const LEVEL_QUEUE_SIZE: usize = 64;

/// Control-side end of a [`SharedLevelTracker`].
///
/// Rates and thresholds are derived here, before queueing, so the audio
/// thread only stores finished values.
pub struct LevelHandle {
    tx: Producer<LevelMessage>,
    period_micro_sec: u32,
}

impl LevelHandle {
    pub fn send(&mut self, command: LevelCommand) -> Result<(), Error> {
        let message = command.prepare(self.period_micro_sec);
        self.tx.push(message).map_err(|_| Error::QueueFull)
    }

    /// Decode a text command and queue it. Returns what was queued.
    pub fn apply_command(&mut self, line: &str) -> Result<LevelCommand, Error> {
        let command = parse_command(line)?;
        self.send(command)?;
        Ok(command)
    }

    pub fn set_attack_micro_sec(&mut self, micro_sec: u32) -> Result<(), Error> {
        self.send(LevelCommand::SetAttack(micro_sec))
    }

    pub fn set_release_micro_sec(&mut self, micro_sec: u32) -> Result<(), Error> {
        self.send(LevelCommand::SetRelease(micro_sec))
    }

    pub fn set_threshold_percent(&mut self, percent: u8) -> Result<(), Error> {
        self.send(LevelCommand::SetThresholdPercent(percent))
    }

    pub fn reset(&mut self) -> Result<(), Error> {
        self.send(LevelCommand::Reset)
    }
}

/// Audio-side level tracker that picks up queued parameter changes.
///
/// Pending messages are applied before each block (or sample), never in the
/// middle of one.
pub struct SharedLevelTracker<R = Consumer<LevelMessage>> {
    state: LevelState,
    rx: R,
}

impl SharedLevelTracker {
    pub fn new(params: &LevelParams) -> (Self, LevelHandle) {
        Self::from_state(LevelState::from_params(params))
    }

    /// Share an already configured tracker. The handle derives rates for the
    /// tracker's sample period.
    pub fn from_state(state: LevelState) -> (Self, LevelHandle) {
        let (tx, rx) = RingBuffer::<LevelMessage>::new(LEVEL_QUEUE_SIZE);

        let handle = LevelHandle {
            tx,
            period_micro_sec: state.period_micro_sec(),
        };
        let tracker = Self::with_receiver(state, rx);
        (tracker, handle)
    }
}

impl<R: MessageReceiver> SharedLevelTracker<R> {
    pub fn with_receiver(state: LevelState, rx: R) -> Self {
        Self { state, rx }
    }

    /// Apply pending messages, then track `input`, writing levels into `out`.
    pub fn render_block(&mut self, input: &[i32], out: &mut [i32]) {
        self.drain_messages();
        self.state.render(input, out);
    }

    /// Apply pending messages, then track one sample.
    #[inline]
    pub fn next_sample(&mut self, xn: i32) -> i32 {
        self.drain_messages();
        self.state.update(xn)
    }

    pub fn state(&self) -> &LevelState {
        &self.state
    }

    fn drain_messages(&mut self) {
        while let Some(message) = self.rx.pop() {
            message.apply(&mut self.state);
        }
    }
}
