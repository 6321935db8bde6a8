use gridsnake_core::game::TickOutcome;
use log::{debug, info};
use smallvec::{smallvec, SmallVec};

/// Sound played by the host for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Cue {
    #[display(fmt = "step")]
    Step,
    #[display(fmt = "food")]
    Food,
    /// The game over fall.
    #[display(fmt = "fall")]
    Fall,
    /// Cuts the step sound short.
    #[display(fmt = "silence")]
    Silence,
}

pub fn cues_for(outcome: &TickOutcome) -> SmallVec<[Cue; 2]> {
    match outcome {
        TickOutcome::Continued(_) => smallvec![Cue::Step],
        TickOutcome::FoodEaten(_) => smallvec![Cue::Food],
        TickOutcome::GameOver(_) => smallvec![Cue::Silence, Cue::Fall],
        TickOutcome::Stopped => smallvec![Cue::Silence],
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Logs cues instead of playing them.
#[derive(Debug, Default, new)]
pub struct LogAudio {
    muted: bool,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        match cue {
            Cue::Step | Cue::Silence => debug!("audio: {}", cue),
            Cue::Food | Cue::Fall => info!("audio: {}", cue),
        }
    }
}

#[cfg(test)]
use gridsnake_core::game::{Game, GameConfig};

#[test]
fn test_cues_for_outcomes() {
    let game = Game::new_game(GameConfig::default()).expect("valid configuration");
    let snapshot = game.snapshot().expect("snapshot");
    assert_eq!(
        cues_for(&TickOutcome::Continued(snapshot.clone())).as_slice(),
        &[Cue::Step]
    );
    assert_eq!(
        cues_for(&TickOutcome::FoodEaten(snapshot.clone())).as_slice(),
        &[Cue::Food]
    );
    assert_eq!(
        cues_for(&TickOutcome::GameOver(snapshot)).as_slice(),
        &[Cue::Silence, Cue::Fall]
    );
    assert_eq!(cues_for(&TickOutcome::Stopped).as_slice(), &[Cue::Silence]);
}
