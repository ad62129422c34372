use crate::config::Seed;
use crate::model::AppEntry;

/// The user's home-screen shortcuts: an ordered list with no two entries
/// sharing an application id. Insertion order is display order. Lives only
/// for the process lifetime; touched exclusively by the UI thread.
#[derive(Debug, Default)]
pub struct Shortcuts {
    entries: Vec<AppEntry>,
}

impl Shortcuts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unless an entry with the same id is already present. Returns
    /// whether anything was inserted; the view only refreshes on `true`.
    pub fn add_if_absent(&mut self, app: AppEntry) -> bool {
        if self.entries.iter().any(|entry| entry.id == app.id) {
            return false;
        }

        self.entries.push(app);
        true
    }

    /// Seeds the list from configured candidates. Deliberately does not
    /// consult the installed catalog: a candidate that is not installed still
    /// lands here, and its launch attempt resolves to nothing later.
    pub fn seed(&mut self, seeds: &[Seed]) {
        for seed in seeds {
            let inserted = self.add_if_absent(AppEntry {
                name: seed.name.clone(),
                id: seed.id.clone(),
                icon: None,
                exec: None,
            });

            if !inserted {
                log::warn!("duplicate shortcut seed: {}", seed.id);
            }
        }

        log::info!("seeded {} shortcuts", self.entries.len());
    }

    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn app(id: &str, name: &str) -> AppEntry {
        AppEntry {
            name: name.to_owned(),
            id: id.to_owned(),
            icon: None,
            exec: None,
        }
    }

    fn seed(id: &str, name: &str) -> Seed {
        Seed {
            id: id.to_owned(),
            name: name.to_owned(),
        }
    }

    #[test]
    fn test_add_if_absent_inserts_once_per_id() {
        let mut shortcuts = Shortcuts::new();

        assert!(shortcuts.add_if_absent(app("org.example.Alpha", "Alpha")));
        assert!(!shortcuts.add_if_absent(app("org.example.Alpha", "Alpha")));
        // same id under a different label is still the same application
        assert!(!shortcuts.add_if_absent(app("org.example.Alpha", "Alpha II")));
        assert!(shortcuts.add_if_absent(app("org.example.Beta", "Beta")));

        assert_eq!(shortcuts.entries().len(), 2);
    }

    #[test]
    fn test_no_duplicate_ids_regardless_of_order() {
        let mut shortcuts = Shortcuts::new();
        let ids = ["a", "b", "a", "c", "b", "a", "c"];

        for id in ids {
            shortcuts.add_if_absent(app(id, id));
        }

        let mut seen = std::collections::HashSet::new();
        assert!(shortcuts
            .entries()
            .iter()
            .all(|entry| seen.insert(entry.id.clone())));
        assert_eq!(shortcuts.entries().len(), 3);
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut shortcuts = Shortcuts::new();
        shortcuts.add_if_absent(app("z", "Zebra"));
        shortcuts.add_if_absent(app("a", "Alpha"));

        let names: Vec<_> = shortcuts
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zebra", "Alpha"]);
    }

    #[test]
    fn test_seeding_keeps_uninstalled_candidates() {
        // P3 is not installed anywhere; it still ends up in the model with
        // no exec and its launch attempt later resolves to nothing
        let seeds = [
            seed("org.example.P1", "One"),
            seed("org.example.P2", "Two"),
            seed("org.example.P3", "Three"),
            seed("org.example.P4", "Four"),
        ];

        let mut shortcuts = Shortcuts::new();
        shortcuts.seed(&seeds);

        assert_eq!(shortcuts.entries().len(), 4);
        let p3 = &shortcuts.entries()[2];
        assert_eq!(p3.id, "org.example.P3");
        assert!(p3.exec.is_none());
        assert!(p3.icon.is_none());
    }

    #[test]
    fn test_duplicate_seed_is_collapsed() {
        let seeds = [seed("org.example.P1", "One"), seed("org.example.P1", "One")];

        let mut shortcuts = Shortcuts::new();
        shortcuts.seed(&seeds);

        assert_eq!(shortcuts.entries().len(), 1);
    }
}
