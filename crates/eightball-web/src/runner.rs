use eightball_engine::{
    ConfigResult, FixedTimestep, FrameBuffer, GameEvent, InputEvent, ProtocolLayout, Session,
    SessionConfig,
};

/// Wires one [`Session`] to the host loop.
///
/// The host calls [`SessionRunner::tick`] once per display frame with the
/// elapsed wall-clock time; the runner turns that into whole simulation
/// frames and packs the result into the shared frame buffer.
pub struct SessionRunner {
    session: Session,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    buffer: FrameBuffer,
    /// Events from every simulation frame run during the last host frame.
    events: Vec<GameEvent>,
}

impl SessionRunner {
    pub fn new(config: SessionConfig) -> ConfigResult<Self> {
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let buffer = FrameBuffer::new(layout.clone());
        let events = Vec::with_capacity(layout.max_events);
        let session = Session::new(config)?;

        let mut runner = Self {
            session,
            timestep,
            layout,
            buffer,
            events,
        };
        runner.buffer.write(&runner.session, &runner.events);
        Ok(runner)
    }

    /// Parse a JSON config; invalid input falls back to the defaults.
    pub fn from_json_or_default(json: &str) -> ConfigResult<Self> {
        let config = match SessionConfig::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}; using default config");
                SessionConfig::default()
            }
        };
        Self::new(config)
    }

    /// Push an input event into the session queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.session.push_input(event);
    }

    /// Run the simulation frames due for `dt` seconds and repack the buffer.
    pub fn tick(&mut self, dt: f32) {
        self.events.clear();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            if !self.session.is_running() {
                break;
            }
            self.session.tick();
            let room = self.layout.max_events.saturating_sub(self.events.len());
            let emitted = self.session.events();
            if emitted.len() > room {
                log::warn!("Dropping {} game events this frame", emitted.len() - room);
            }
            self.events.extend(emitted.iter().take(room).copied());
        }

        self.buffer.write(&self.session, &self.events);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn ball_data_offset(&self) -> u32 {
        self.layout.ball_data_offset as u32
    }

    pub fn event_data_offset(&self) -> u32 {
        self.layout.event_data_offset as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eightball_engine::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_RUNNING};
    use eightball_engine::input::queue::KEY_ESCAPE;

    #[test]
    fn runs_one_frame_per_fixed_step() {
        let mut runner = SessionRunner::new(SessionConfig::default()).unwrap();
        runner.tick(1.0 / 30.0 + 1e-4);
        assert_eq!(runner.session().frame(), 2);
        runner.tick(0.0);
        assert_eq!(runner.session().frame(), 2);
        assert_eq!(runner.buffer.as_slice()[HEADER_FRAME_COUNTER], 2.0);
    }

    #[test]
    fn bad_json_falls_back_to_defaults() {
        let runner = SessionRunner::from_json_or_default("{ not json").unwrap();
        assert_eq!(runner.session().config(), &SessionConfig::default());
    }

    #[test]
    fn escape_marks_the_buffer_stopped() {
        let mut runner = SessionRunner::new(SessionConfig::default()).unwrap();
        runner.push_input(InputEvent::KeyDown { key_code: KEY_ESCAPE });
        runner.tick(1.0 / 60.0 + 1e-4);
        assert!(!runner.is_running());
        assert_eq!(runner.buffer.as_slice()[HEADER_RUNNING], 0.0);
    }
}
