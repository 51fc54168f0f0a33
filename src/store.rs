//! Subscription state and the transitions that mutate it.
//!
//! [`SubscriptionState`] is only ever changed by [`reduce`], which applies
//! one [`Transition`] to an owned state and returns the next state. The
//! [`Store`] wraps the current state with a version counter so renderers
//! can tell when something changed.

use std::collections::HashMap;

use crate::models::{ConnectionStatus, PriceRecord, Symbol};

/// Every state change the store accepts.
///
/// The match in [`reduce`] is exhaustive, so a new kind cannot be added
/// without deciding its effect.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Sets the connection status; `Open` also clears the error.
    SetConnectionStatus(ConnectionStatus),
    /// Stores the latest record for a symbol and settles loading.
    UpdatePrice { symbol: Symbol, record: PriceRecord },
    /// Changes the selected symbol and starts loading.
    SelectSymbol(Symbol),
    /// Sets or clears the error and settles loading.
    SetError(Option<String>),
    /// Sets the loading flag.
    SetLoading(bool),
    /// Returns everything except the selection to initial values.
    Reset,
}

/// Aggregate dashboard state.
#[derive(Clone, Debug, PartialEq)]
pub struct SubscriptionState {
    prices: HashMap<Symbol, Option<PriceRecord>>,
    connection_status: ConnectionStatus,
    selected: Symbol,
    error: Option<String>,
    loading: bool,
}

impl SubscriptionState {
    /// Initial state with no prices, an uninstantiated connection and the
    /// given selection.
    pub fn new(selected: Symbol) -> Self {
        Self {
            prices: Symbol::ALL.into_iter().map(|s| (s, None)).collect(),
            connection_status: ConnectionStatus::Uninstantiated,
            selected,
            error: None,
            loading: false,
        }
    }

    /// Latest record for `symbol`, if one has arrived.
    pub fn price(&self, symbol: Symbol) -> Option<&PriceRecord> {
        self.prices.get(&symbol).and_then(Option::as_ref)
    }

    /// Latest record for the selected symbol.
    pub fn selected_price(&self) -> Option<&PriceRecord> {
        self.price(self.selected)
    }

    pub fn status(&self) -> ConnectionStatus {
        self.connection_status
    }

    pub fn selected(&self) -> Symbol {
        self.selected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl Default for SubscriptionState {
    fn default() -> Self {
        Self::new(Symbol::default())
    }
}

/// Applies a single transition, producing the next state.
pub fn reduce(mut state: SubscriptionState, transition: Transition) -> SubscriptionState {
    match transition {
        Transition::SetConnectionStatus(status) => {
            state.connection_status = status;
            if status == ConnectionStatus::Open {
                state.error = None;
            }
        }
        Transition::UpdatePrice { symbol, record } => {
            state.prices.insert(symbol, Some(record));
            state.loading = false;
            state.error = None;
        }
        Transition::SelectSymbol(symbol) => {
            state.selected = symbol;
            state.loading = true;
        }
        Transition::SetError(error) => {
            state.error = error;
            state.loading = false;
        }
        Transition::SetLoading(loading) => {
            state.loading = loading;
        }
        Transition::Reset => {
            state = SubscriptionState::new(state.selected);
        }
    }
    state
}

/// Owner of the one [`SubscriptionState`] instance.
#[derive(Debug, Default)]
pub struct Store {
    state: SubscriptionState,
    version: u64,
}

impl Store {
    /// Creates a store in the initial state with `selected` chosen.
    pub fn new(selected: Symbol) -> Self {
        Self {
            state: SubscriptionState::new(selected),
            version: 0,
        }
    }

    /// Applies a transition and bumps the version.
    pub fn dispatch(&mut self, transition: Transition) {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, transition);
        self.version += 1;
    }

    /// Read-only access to the current state.
    pub fn state(&self) -> &SubscriptionState {
        &self.state
    }

    /// Number of transitions applied so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Copies out what the dashboard renders.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            selected: self.state.selected,
            price: self.state.selected_price().cloned(),
            status: self.state.connection_status,
            error: self.state.error.clone(),
            loading: self.state.loading,
            previews: Symbol::ALL
                .into_iter()
                .map(|s| (s, self.state.price(s).cloned()))
                .collect(),
        }
    }
}

/// Render-time copy of the store.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub selected: Symbol,
    pub price: Option<PriceRecord>,
    pub status: ConnectionStatus,
    pub error: Option<String>,
    pub loading: bool,
    /// Latest record per symbol in selector order.
    pub previews: Vec<(Symbol, Option<PriceRecord>)>,
}
