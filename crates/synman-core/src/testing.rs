//! Recording fakes for the collaborator traits.
//!
//! All fakes of one [`Harness`] write to a shared journal so tests can assert
//! on the exact order of side effects across collaborators. Any operation can
//! be made to fail with [`Harness::fail`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::MonitorService;
use crate::error::{Error, Result};
use crate::files::FileStore;
use crate::manifest::ManifestStore;
use crate::types::{Location, ManifestEntry, Monitor, MonitorSettings, NewMonitor};

type Journal = Arc<Mutex<Vec<String>>>;
type Failing = Arc<Mutex<HashSet<String>>>;

fn log(journal: &Journal, entry: String) {
    journal.lock().unwrap().push(entry);
}

fn failing(set: &Failing, op: &str) -> bool {
    set.lock().unwrap().contains(op)
}

/// Shared wiring for the three fakes.
pub(crate) struct Harness {
    journal: Journal,
    failing: Failing,
    pub files: Arc<FakeFiles>,
    pub manifest: Arc<FakeManifest>,
    pub remote: Arc<FakeRemote>,
}

impl Harness {
    pub fn new() -> Self {
        let journal = Journal::default();
        let failing = Failing::default();
        Self {
            files: Arc::new(FakeFiles {
                journal: journal.clone(),
                failing: failing.clone(),
                contents: Mutex::default(),
            }),
            manifest: Arc::new(FakeManifest {
                journal: journal.clone(),
                failing: failing.clone(),
                entries: Mutex::default(),
            }),
            remote: Arc::new(FakeRemote {
                journal: journal.clone(),
                failing: failing.clone(),
                next_location: Mutex::new("http://service/abc123".into()),
                created: Mutex::default(),
                settings: Mutex::default(),
                monitors: Mutex::default(),
                scripts: Mutex::default(),
                emails: Mutex::default(),
            }),
            journal,
            failing,
        }
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    /// Calls whose description starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    /// Make the named operation (e.g. `remote.create_synthetic`) fail
    pub fn fail(&self, op: &str) {
        self.failing.lock().unwrap().insert(op.to_string());
    }

    pub fn files_dyn(&self) -> Arc<dyn FileStore> {
        self.files.clone()
    }

    pub fn manifest_dyn(&self) -> Arc<dyn ManifestStore> {
        self.manifest.clone()
    }

    pub fn remote_dyn(&self) -> Arc<dyn MonitorService> {
        self.remote.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) struct FakeFiles {
    journal: Journal,
    failing: Failing,
    contents: Mutex<HashMap<String, String>>,
}

impl FakeFiles {
    pub fn put(&self, path: &str, content: &str) {
        self.contents
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.contents.lock().unwrap().get(path).cloned()
    }

    fn check(&self, op: &str, path: &str) -> Result<()> {
        log(&self.journal, format!("files.{} {}", op, path));
        if failing(&self.failing, &format!("files.{}", op)) {
            return Err(Error::file_system(path, std::io::Error::other("disk full")));
        }
        Ok(())
    }
}

#[async_trait]
impl FileStore for FakeFiles {
    async fn exists(&self, path: &str) -> bool {
        log(&self.journal, format!("files.exists {}", path));
        self.contents.lock().unwrap().contains_key(path)
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<()> {
        self.check("create_file", path)?;
        self.put(path, content);
        Ok(())
    }

    async fn read_file(&self, path: &str) -> Result<String> {
        self.check("read_file", path)?;
        self.content(path).ok_or_else(|| {
            Error::file_system(path, std::io::Error::from(std::io::ErrorKind::NotFound))
        })
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        self.check("write_file", path)?;
        self.put(path, content);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Manifest
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) struct FakeManifest {
    journal: Journal,
    failing: Failing,
    entries: Mutex<BTreeMap<String, ManifestEntry>>,
}

impl FakeManifest {
    pub fn insert(&self, id: &str, name: &str, filename: &str) {
        self.entries.lock().unwrap().insert(
            name.to_string(),
            ManifestEntry {
                name: name.to_string(),
                id: id.to_string(),
                filename: filename.to_string(),
            },
        );
    }
}

#[async_trait]
impl ManifestStore for FakeManifest {
    async fn get_synthetic(&self, name: &str) -> Result<Option<ManifestEntry>> {
        log(&self.journal, format!("manifest.get_synthetic {}", name));
        Ok(self.entries.lock().unwrap().get(name).cloned())
    }

    async fn add_synthetic(&self, id: &str, name: &str, filename: &str) -> Result<()> {
        log(
            &self.journal,
            format!("manifest.add_synthetic {} {} {}", id, name, filename),
        );
        if failing(&self.failing, "manifest.add_synthetic") {
            return Err(Error::Other("manifest is read-only".into()));
        }
        self.insert(id, name, filename);
        Ok(())
    }

    async fn exists(&self) -> bool {
        !self.entries.lock().unwrap().is_empty()
    }

    async fn list(&self) -> Result<Vec<ManifestEntry>> {
        Ok(self.entries.lock().unwrap().values().cloned().collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Remote
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) struct FakeRemote {
    journal: Journal,
    failing: Failing,
    next_location: Mutex<String>,
    pub created: Mutex<Vec<NewMonitor>>,
    pub settings: Mutex<Vec<(String, MonitorSettings)>>,
    monitors: Mutex<Vec<Monitor>>,
    scripts: Mutex<HashMap<String, String>>,
    emails: Mutex<HashMap<String, Vec<String>>>,
}

impl FakeRemote {
    /// URL the next create call responds with
    pub fn respond_with_location(&self, url: &str) {
        *self.next_location.lock().unwrap() = url.to_string();
    }

    pub fn add_monitor(&self, monitor: Monitor) {
        self.monitors.lock().unwrap().push(monitor);
    }

    pub fn put_script(&self, id: &str, content: &str) {
        self.scripts
            .lock()
            .unwrap()
            .insert(id.to_string(), content.to_string());
    }

    pub fn script(&self, id: &str) -> Option<String> {
        self.scripts.lock().unwrap().get(id).cloned()
    }

    pub fn emails(&self, id: &str) -> Vec<String> {
        self.emails.lock().unwrap().get(id).cloned().unwrap_or_default()
    }

    fn check(&self, op: &str, detail: String) -> Result<()> {
        log(&self.journal, format!("remote.{} {}", op, detail));
        if failing(&self.failing, &format!("remote.{}", op)) {
            return Err(Error::remote(500, format!("{} failed", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl MonitorService for FakeRemote {
    async fn create_synthetic(&self, monitor: &NewMonitor) -> Result<String> {
        self.check("create_synthetic", monitor.name.clone())?;
        self.created.lock().unwrap().push(monitor.clone());
        Ok(self.next_location.lock().unwrap().clone())
    }

    async fn get_monitor(&self, id: &str) -> Result<Monitor> {
        self.check("get_monitor", id.to_string())?;
        self.monitors
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("/monitors/{}", id)))
    }

    async fn list_monitors(&self) -> Result<Vec<Monitor>> {
        self.check("list_monitors", String::new())?;
        Ok(self.monitors.lock().unwrap().clone())
    }

    async fn update_monitor_settings(&self, id: &str, settings: &MonitorSettings) -> Result<()> {
        self.check("update_monitor_settings", id.to_string())?;
        self.settings
            .lock()
            .unwrap()
            .push((id.to_string(), settings.clone()));
        Ok(())
    }

    async fn get_script(&self, id: &str) -> Result<String> {
        self.check("get_script", id.to_string())?;
        self.script(id)
            .ok_or_else(|| Error::NotFound(format!("/monitors/{}/script", id)))
    }

    async fn set_script(&self, id: &str, content: &str) -> Result<()> {
        self.check("set_script", id.to_string())?;
        self.put_script(id, content);
        Ok(())
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        self.check("list_locations", String::new())?;
        Ok(vec![Location {
            name: "AWS_US_WEST_1".into(),
            label: Some("Portland, OR, USA".into()),
            private: false,
            description: None,
        }])
    }

    async fn get_alert_emails(&self, id: &str) -> Result<Vec<String>> {
        self.check("get_alert_emails", id.to_string())?;
        Ok(self.emails(id))
    }

    async fn add_alert_emails(&self, id: &str, emails: &[String]) -> Result<()> {
        self.check("add_alert_emails", format!("{} {}", id, emails.join(",")))?;
        self.emails
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .extend(emails.iter().cloned());
        Ok(())
    }

    async fn remove_alert_email(&self, id: &str, email: &str) -> Result<()> {
        self.check("remove_alert_email", format!("{} {}", id, email))?;
        if let Some(list) = self.emails.lock().unwrap().get_mut(id) {
            list.retain(|e| e != email);
        }
        Ok(())
    }
}
