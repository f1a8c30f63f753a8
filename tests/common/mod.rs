#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sheet_records::source::{RemoteConnector, RemoteSession, SessionError, SessionTimeouts};
use sheet_records::types::RemoteEntry;

pub fn tmp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("sheet-records-{name}-{nanos}"))
}

pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// Workbook bytes with one sheet per `(name, rows)`; every cell is written as a string.
pub fn xlsx_bytes(sheets: &[(&str, Vec<Vec<&str>>)]) -> Vec<u8> {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    for (name, rows) in sheets {
        let ws = wb.add_worksheet();
        ws.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                ws.write_string(r as u32, c as u16, *cell).unwrap();
            }
        }
    }
    wb.save_to_buffer().unwrap()
}

/// Step at which a [`ScriptedConnector`] session fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FailAt {
    Connect,
    Login,
    List,
    Retrieve,
    Quit,
}

#[derive(Debug, Default)]
pub struct Calls {
    pub connects: AtomicUsize,
    pub logins: AtomicUsize,
    pub quits: AtomicUsize,
    pub retrieved: Mutex<Vec<String>>,
    pub timeouts: Mutex<Vec<SessionTimeouts>>,
}

impl Calls {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn quits(&self) -> usize {
        self.quits.load(Ordering::SeqCst)
    }

    pub fn retrieved(&self) -> Vec<String> {
        self.retrieved.lock().unwrap().clone()
    }
}

/// In-memory remote store that counts calls and fails on demand.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConnector {
    pub listing: Vec<RemoteEntry>,
    pub files: BTreeMap<String, Vec<u8>>,
    pub fail: BTreeSet<FailAt>,
    pub calls: Arc<Calls>,
}

impl ScriptedConnector {
    pub fn with_file(mut self, name: &str, modified_secs: u64, bytes: Vec<u8>) -> Self {
        self.listing
            .push(RemoteEntry::new(name, at(modified_secs), bytes.len() as u64));
        self.files.insert(name.to_string(), bytes);
        self
    }

    pub fn failing_at(mut self, step: FailAt) -> Self {
        self.fail.insert(step);
        self
    }
}

pub struct ScriptedSession {
    store: ScriptedConnector,
}

fn injected(step: FailAt) -> SessionError {
    format!("injected {step:?} failure").into()
}

impl RemoteConnector for ScriptedConnector {
    type Session = ScriptedSession;

    fn connect(&self, _endpoint: &str, timeouts: SessionTimeouts) -> Result<ScriptedSession, SessionError> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);
        self.calls.timeouts.lock().unwrap().push(timeouts);
        if self.fail.contains(&FailAt::Connect) {
            return Err(injected(FailAt::Connect));
        }
        Ok(ScriptedSession { store: self.clone() })
    }
}

impl RemoteSession for ScriptedSession {
    fn login(&mut self, _username: &str, _password: &str) -> Result<(), SessionError> {
        self.store.calls.logins.fetch_add(1, Ordering::SeqCst);
        if self.store.fail.contains(&FailAt::Login) {
            return Err(injected(FailAt::Login));
        }
        Ok(())
    }

    fn list(&mut self) -> Result<Vec<RemoteEntry>, SessionError> {
        if self.store.fail.contains(&FailAt::List) {
            return Err(injected(FailAt::List));
        }
        Ok(self.store.listing.clone())
    }

    fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, SessionError> {
        self.store.calls.retrieved.lock().unwrap().push(name.to_string());
        if self.store.fail.contains(&FailAt::Retrieve) {
            return Err(injected(FailAt::Retrieve));
        }
        self.store
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| format!("550 {name}: no such file").into())
    }

    fn quit(&mut self) -> Result<(), SessionError> {
        self.store.calls.quits.fetch_add(1, Ordering::SeqCst);
        if self.store.fail.contains(&FailAt::Quit) {
            return Err(injected(FailAt::Quit));
        }
        Ok(())
    }
}
