//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use simshell::pty::{ByteStream, MemoryStream, SharedStream};
use simshell::shell::{RedirectMode, ResourceOpener};
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

pub fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub fn memory() -> Arc<MemoryStream> {
    Arc::new(MemoryStream::new())
}

/// Drain a non-blocking stream into a string.
pub fn drain(stream: &dyn ByteStream) -> String {
    let mut out = Vec::new();
    let mut buf = [0u8; 64];
    loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => out.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// In-memory stand-in for the dispatcher's file opener.
#[derive(Default)]
pub struct MemoryOpener {
    pub files: Mutex<HashMap<String, Arc<MemoryStream>>>,
    pub opened: Mutex<Vec<(String, RedirectMode)>>,
}

impl MemoryOpener {
    pub fn with_file(path: &str, contents: &[u8]) -> Self {
        let opener = Self::default();
        opener
            .files
            .lock()
            .insert(path.to_string(), Arc::new(MemoryStream::with_contents(contents)));
        opener
    }

    pub fn file(&self, path: &str) -> Option<Arc<MemoryStream>> {
        self.files.lock().get(path).cloned()
    }
}

impl ResourceOpener for MemoryOpener {
    fn open(&self, path: &str, mode: RedirectMode) -> io::Result<SharedStream> {
        self.opened.lock().push((path.to_string(), mode));
        let mut files = self.files.lock();
        let stream = match mode {
            RedirectMode::Input => files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?,
            RedirectMode::Output => {
                let stream = Arc::new(MemoryStream::new());
                files.insert(path.to_string(), Arc::clone(&stream));
                stream
            }
            RedirectMode::Append => Arc::clone(
                files
                    .entry(path.to_string())
                    .or_insert_with(|| Arc::new(MemoryStream::new())),
            ),
        };
        Ok(stream)
    }
}
