use near_sdk::near;

use crate::project::{Project, ProjectStatus};

use super::Contract;

#[near(serializers = [json])]
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub creator_id: Option<String>,
    pub status_mask: Option<u8>,
}

#[near]
impl Contract {
    /// `GetFoundation(id)`.
    pub fn get_foundation(&self, project_id: String) -> Project {
        self.project_or_panic(&project_id).clone()
    }

    /// `GetFoundations(filter)`. A `creator_id` filter returns that
    /// creator's own projects regardless of status, mirroring a project
    /// owner's full visibility into their own drafts; without one, only
    /// projects matching `status_mask` (default `ACTIVE|CLOSED`) are
    /// visible — the read view any other caller gets. Sorted by
    /// `created_at` ascending, stable, as the spec requires.
    pub fn get_foundations(&self, filter: Filter) -> Vec<Project> {
        let mut projects: Vec<&Project> = self.projects.iter().map(|(_, p)| p).collect();
        projects.sort_by_key(|p| p.created_at);

        match filter.creator_id {
            Some(creator_id) => projects
                .into_iter()
                .filter(|p| p.creator_id == creator_id)
                .cloned()
                .collect(),
            None => {
                let mask = filter.status_mask.unwrap_or_else(ProjectStatus::default_mask);
                projects
                    .into_iter()
                    .filter(|p| p.status.bit() & mask != 0)
                    .cloned()
                    .collect()
            }
        }
    }
}
