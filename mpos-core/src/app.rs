//! Application flow as a pure state machine.
//!
//! The top-level controller owns one [`AppFlow`] value and applies
//! [`transition`] for every event; there is no ambient mutable singleton.
//! Events that make no sense in the current state leave it unchanged.

/// The screen the application is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Welcome,
    OnboardingCurrency,
    OnboardingTax,
    Main,
}

/// The application flow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppFlow {
    pub screen: Screen,
    pub authenticated: bool,
    /// Authenticated screens are blocked while locked; credentials stay.
    pub locked: bool,
}

impl AppFlow {
    /// The initial unauthenticated state.
    pub fn initial() -> Self {
        Self {
            screen: Screen::Login,
            authenticated: false,
            locked: false,
        }
    }
}

impl Default for AppFlow {
    fn default() -> Self {
        Self::initial()
    }
}

/// Everything that can move the application flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    LoginSucceeded,
    /// Start onboarding from the welcome screen.
    OnboardingStarted,
    /// Skip onboarding from the welcome screen (already configured).
    OnboardingSkipped,
    CurrencyConfigured,
    TaxConfigured,
    SignedOut,
    Locked,
    Unlocked,
}

/// Apply one event. Pure; invalid events return the state unchanged.
pub fn transition(state: AppFlow, event: AppEvent) -> AppFlow {
    match (state.screen, event) {
        (Screen::Login, AppEvent::LoginSucceeded) => AppFlow {
            screen: Screen::Welcome,
            authenticated: true,
            locked: false,
        },
        (Screen::Welcome, AppEvent::OnboardingStarted) => AppFlow {
            screen: Screen::OnboardingCurrency,
            ..state
        },
        (Screen::Welcome, AppEvent::OnboardingSkipped) => AppFlow {
            screen: Screen::Main,
            ..state
        },
        (Screen::OnboardingCurrency, AppEvent::CurrencyConfigured) => AppFlow {
            screen: Screen::OnboardingTax,
            ..state
        },
        (Screen::OnboardingTax, AppEvent::TaxConfigured) => AppFlow {
            screen: Screen::Main,
            ..state
        },
        (_, AppEvent::SignedOut) => AppFlow::initial(),
        (_, AppEvent::Locked) if state.authenticated => AppFlow {
            locked: true,
            ..state
        },
        (_, AppEvent::Unlocked) => AppFlow {
            locked: false,
            ..state
        },
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: &[AppEvent]) -> AppFlow {
        events
            .iter()
            .fold(AppFlow::initial(), |state, &event| transition(state, event))
    }

    #[test]
    fn full_onboarding_path_reaches_main() {
        let state = run(&[
            AppEvent::LoginSucceeded,
            AppEvent::OnboardingStarted,
            AppEvent::CurrencyConfigured,
            AppEvent::TaxConfigured,
        ]);
        assert_eq!(state.screen, Screen::Main);
        assert!(state.authenticated);
    }

    #[test]
    fn onboarded_merchants_skip_straight_to_main() {
        let state = run(&[AppEvent::LoginSucceeded, AppEvent::OnboardingSkipped]);
        assert_eq!(state.screen, Screen::Main);
    }

    #[test]
    fn sign_out_resets_from_anywhere() {
        let state = run(&[
            AppEvent::LoginSucceeded,
            AppEvent::OnboardingStarted,
            AppEvent::SignedOut,
        ]);
        assert_eq!(state, AppFlow::initial());
    }

    #[test]
    fn lock_requires_authentication_and_keeps_the_screen() {
        // locking while signed out does nothing
        let state = transition(AppFlow::initial(), AppEvent::Locked);
        assert!(!state.locked);

        let state = run(&[
            AppEvent::LoginSucceeded,
            AppEvent::OnboardingSkipped,
            AppEvent::Locked,
        ]);
        assert!(state.locked);
        assert_eq!(state.screen, Screen::Main);

        let state = transition(state, AppEvent::Unlocked);
        assert!(!state.locked);
    }

    #[test]
    fn out_of_order_events_are_ignored() {
        let state = transition(AppFlow::initial(), AppEvent::TaxConfigured);
        assert_eq!(state, AppFlow::initial());

        let state = run(&[AppEvent::LoginSucceeded, AppEvent::CurrencyConfigured]);
        assert_eq!(state.screen, Screen::Welcome);
    }
}
