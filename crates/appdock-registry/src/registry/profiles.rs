use appdock_common::{AppId, ChangeKind, DockError, EntityKind, Event, ProfileId, Result};
use tracing::info;

use super::{app_removed_event, workspace_event, Registry};
use crate::model::{NewProfile, Profile, ProfilePatch};
use crate::validation::validate_name;

impl Registry {
    pub fn get_profile(&self, id: &ProfileId) -> Result<Profile> {
        self.read()
            .profiles
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| DockError::not_found(EntityKind::Profile, id))
    }

    pub fn list_profiles(&self) -> Vec<Profile> {
        self.read().profiles.clone()
    }

    pub fn current_profile(&self) -> Option<ProfileId> {
        self.read().current_profile.clone()
    }

    pub fn create_profile(&self, input: NewProfile) -> Result<Profile> {
        validate_name("name", &input.name)?;

        self.mutate(|state| {
            let profile = Profile {
                id: ProfileId::new(),
                name: input.name.trim().to_string(),
            };
            info!(profile_id = %profile.id, name = %profile.name, "profile created");
            state.profiles.push(profile.clone());
            let event = Event::ProfileChanged {
                profile_id: profile.id.clone(),
                change: ChangeKind::Created,
            };
            Ok((profile, vec![event]))
        })
    }

    pub fn update_profile(&self, id: &ProfileId, patch: ProfilePatch) -> Result<Profile> {
        if let Some(name) = &patch.name {
            validate_name("name", name)?;
        }

        self.mutate(|state| {
            let profile = state
                .profiles
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or_else(|| DockError::not_found(EntityKind::Profile, id))?;
            if let Some(name) = patch.name {
                profile.name = name.trim().to_string();
            }
            let event = Event::ProfileChanged {
                profile_id: profile.id.clone(),
                change: ChangeKind::Updated,
            };
            Ok((profile.clone(), vec![event]))
        })
    }

    /// Delete a profile with all its workspaces and apps.
    ///
    /// Callers must release the surfaces of [`apps_in_profile`](Self::apps_in_profile)
    /// first.
    pub fn delete_profile(&self, id: &ProfileId) -> Result<Profile> {
        self.mutate(|state| {
            let index = state
                .profiles
                .iter()
                .position(|p| &p.id == id)
                .ok_or_else(|| DockError::not_found(EntityKind::Profile, id))?;
            let profile = state.profiles.remove(index);

            let mut events = Vec::new();
            let (removed_ws, kept_ws): (Vec<_>, Vec<_>) = std::mem::take(&mut state.workspaces)
                .into_iter()
                .partition(|ws| &ws.profile_id == id);
            state.workspaces = kept_ws;

            let (removed_apps, kept_apps): (Vec<_>, Vec<_>) = std::mem::take(&mut state.apps)
                .into_iter()
                .partition(|app| removed_ws.iter().any(|ws| ws.id == app.workspace_id));
            state.apps = kept_apps;

            events.extend(removed_apps.iter().map(app_removed_event));
            events.extend(
                removed_ws
                    .iter()
                    .map(|ws| workspace_event(ws, ChangeKind::Deleted)),
            );
            events.push(Event::ProfileChanged {
                profile_id: profile.id.clone(),
                change: ChangeKind::Deleted,
            });

            if state.current_profile.as_ref() == Some(id) {
                state.current_profile = None;
            }
            let current_gone = state
                .current_workspace
                .as_ref()
                .is_some_and(|cw| removed_ws.iter().any(|ws| &ws.id == cw));
            if current_gone {
                state.current_workspace = None;
            }

            info!(
                profile_id = %profile.id,
                workspaces = removed_ws.len(),
                apps = removed_apps.len(),
                "profile deleted"
            );
            Ok((profile, events))
        })
    }

    /// Make `id` the current profile and select its first workspace.
    pub fn set_current_profile(&self, id: &ProfileId) -> Result<Profile> {
        self.mutate(|state| {
            let profile = state
                .profiles
                .iter()
                .find(|p| &p.id == id)
                .cloned()
                .ok_or_else(|| DockError::not_found(EntityKind::Profile, id))?;
            state.current_profile = Some(profile.id.clone());
            state.current_workspace = state.first_workspace_of(id);
            info!(profile_id = %profile.id, "switched profile");
            let event = Event::ProfileChanged {
                profile_id: profile.id.clone(),
                change: ChangeKind::Switched,
            };
            Ok((profile, vec![event]))
        })
    }

    /// Every app owned by the profile's workspaces.
    pub fn apps_in_profile(&self, id: &ProfileId) -> Result<Vec<AppId>> {
        let state = self.read();
        if !state.profiles.iter().any(|p| &p.id == id) {
            return Err(DockError::not_found(EntityKind::Profile, id));
        }
        Ok(state
            .apps
            .iter()
            .filter(|app| {
                state
                    .workspaces
                    .iter()
                    .any(|ws| ws.id == app.workspace_id && &ws.profile_id == id)
            })
            .map(|app| app.id.clone())
            .collect())
    }
}
