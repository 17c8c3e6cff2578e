use std::collections::VecDeque;
use std::sync::{
    Mutex,
    mpsc::{Receiver, Sender},
};

use stream_lineup::feed::{error::FeedError, source::StreamSource};
use stream_lineup::stream::stream_model::LiveStream;

/// Replays a fixed sequence of fetch results, then keeps returning the last
/// successful snapshot.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<Vec<LiveStream>, String>>>,
    last: Mutex<Vec<LiveStream>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<LiveStream>, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(vec![]),
        }
    }
}

impl StreamSource for ScriptedSource {
    fn fetch(&self) -> Result<Vec<LiveStream>, FeedError> {
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Ok(streams)) => {
                *self.last.lock().unwrap() = streams.clone();
                Ok(streams)
            }
            Some(Err(msg)) => Err(FeedError::Config(msg)),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }
}

/// First fetch announces itself on `entered` and blocks until `release`
/// fires; every later fetch returns `fast` immediately.
pub struct GatedSource {
    pub slow: Vec<LiveStream>,
    pub fast: Vec<LiveStream>,
    pub entered: Mutex<Option<Sender<()>>>,
    pub release: Mutex<Receiver<()>>,
    pub calls: Mutex<u32>,
}

impl StreamSource for GatedSource {
    fn fetch(&self) -> Result<Vec<LiveStream>, FeedError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };

        if call == 1 {
            if let Some(tx) = self.entered.lock().unwrap().take() {
                tx.send(()).unwrap();
            }
            self.release.lock().unwrap().recv().unwrap();
            Ok(self.slow.clone())
        } else {
            Ok(self.fast.clone())
        }
    }
}
