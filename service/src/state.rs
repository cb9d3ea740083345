//! Session-scoped client state.
//!
//! Every store is owned by [`AppState`] and mutated only through its
//! `&mut self` methods, so there is a single writer at a time and the last
//! write wins.

use crate::domain::{
    application, lease, listing, maintenance, payout, user, user::Profile,
};

/// State shared by the screens of a single client session.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// [`Profile`] of the user the dashboard is shown for.
    dashboard_user: Option<Profile>,

    /// Selection made on the admin screens.
    admin_selection: AdminSelection,

    /// Record currently open in an edit form.
    editing: Option<Editing>,
}

/// Selection made on the admin screens.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AdminSelection {
    /// Selected user.
    pub user: Option<user::Id>,

    /// Selected payout period.
    pub payout_period: Option<payout::Id>,
}

/// Backend-issued ID of a record being edited.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Editing {
    /// [`Listing`] is being edited.
    ///
    /// [`Listing`]: crate::domain::Listing
    Listing(listing::Id),

    /// [`Lease`] is being edited.
    ///
    /// [`Lease`]: crate::domain::Lease
    Lease(lease::Id),

    /// [`MaintenanceRequest`] is being edited.
    ///
    /// [`MaintenanceRequest`]: crate::domain::MaintenanceRequest
    Maintenance(maintenance::Id),

    /// [`Application`] is being reviewed.
    ///
    /// [`Application`]: crate::domain::Application
    Application(application::Id),
}

impl AppState {
    /// Returns the [`Profile`] the dashboard is shown for.
    #[must_use]
    pub fn dashboard_user(&self) -> Option<&Profile> {
        self.dashboard_user.as_ref()
    }

    /// Sets the [`Profile`] the dashboard is shown for.
    pub fn set_dashboard_user(&mut self, profile: Profile) {
        self.dashboard_user = Some(profile);
    }

    /// Returns the current [`AdminSelection`].
    #[must_use]
    pub fn admin_selection(&self) -> AdminSelection {
        self.admin_selection
    }

    /// Selects the provided user on the admin screens.
    pub fn select_user(&mut self, id: Option<user::Id>) {
        self.admin_selection.user = id;
    }

    /// Selects the provided payout period on the admin screens.
    pub fn select_payout_period(&mut self, id: Option<payout::Id>) {
        self.admin_selection.payout_period = id;
    }

    /// Returns the record currently being edited.
    #[must_use]
    pub fn editing(&self) -> Option<Editing> {
        self.editing
    }

    /// Opens the provided record for editing, replacing any previous one.
    pub fn start_editing(&mut self, record: Editing) {
        if let Some(prev) = self.editing.replace(record) {
            tracing::debug!(?prev, ?record, "replaced edited record");
        }
    }

    /// Closes the edited record, returning it.
    pub fn finish_editing(&mut self) -> Option<Editing> {
        self.editing.take()
    }

    /// Forgets everything, as on signing out.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod spec {
    use super::{AppState, Editing};

    #[test]
    fn last_write_wins() {
        let mut state = AppState::default();
        let a = uuid::Uuid::from_u128(1).into();
        let b = uuid::Uuid::from_u128(2).into();

        state.select_user(Some(a));
        state.select_user(Some(b));
        assert_eq!(state.admin_selection().user, Some(b));

        state.start_editing(Editing::Listing(uuid::Uuid::from_u128(3).into()));
        state.start_editing(Editing::Lease(uuid::Uuid::from_u128(4).into()));
        assert!(matches!(state.finish_editing(), Some(Editing::Lease(_))));
        assert_eq!(state.editing(), None);

        state.clear();
        assert_eq!(state.admin_selection().user, None);
        assert!(state.dashboard_user().is_none());
    }
}
