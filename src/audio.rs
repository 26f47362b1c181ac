//! Audio playback using rodio
//!
//! Both clips are optional. If the output device, a clip, or its decoder is
//! unavailable, the matching sound is skipped and the game carries on.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::AudioClip;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A fruit was cut
    Slice,
}

/// Open output device. The stream must outlive every sink on its handle.
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Audio manager for the game
pub struct AudioManager {
    output: Option<Output>,
    slice_sound: Option<AudioClip>,
    /// Looping background track; dropping it stops playback
    _music: Option<Sink>,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioManager {
    /// Open the default output device and start the background track
    pub fn new(
        slice_sound: Option<AudioClip>,
        music: Option<AudioClip>,
        settings: &Settings,
    ) -> Self {
        let output = match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Output {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                log::warn!("Failed to open audio output ({e}) - audio disabled");
                None
            }
        };

        let mut manager = Self {
            output,
            slice_sound,
            _music: None,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        };

        if let Some(clip) = music {
            manager.start_music(clip);
        }

        manager
    }

    /// Play a sound effect (fire and forget)
    pub fn play(&self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }

        let clip = match effect {
            SoundEffect::Slice => self.slice_sound.as_ref(),
        };
        let (Some(output), Some(clip)) = (&self.output, clip) else {
            return;
        };

        let Ok(sink) = Sink::try_new(&output.handle) else {
            return;
        };
        let source = match Decoder::new(Cursor::new(clip.clone())) {
            Ok(source) => source,
            Err(e) => {
                log::debug!("Failed to decode {:?} clip: {}", effect, e);
                return;
            }
        };
        sink.set_volume(self.sfx_volume);
        sink.append(source);
        sink.detach();
    }

    /// Loop the background track forever
    fn start_music(&mut self, clip: AudioClip) {
        let Some(output) = &self.output else {
            return;
        };

        let sink = match Sink::try_new(&output.handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::warn!("Failed to create music sink ({e}). Proceeding without music.");
                return;
            }
        };
        let source = match Decoder::new(Cursor::new(clip)) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("Failed to decode background music ({e}). Proceeding without music.");
                return;
            }
        };

        sink.set_volume(self.music_volume);
        sink.append(source.repeat_infinite());
        self._music = Some(sink);
        log::info!("Background music started");
    }
}
