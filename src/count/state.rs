use crate::store::{create_store, Action, SetState, Store};

/// State of one counter: the value and the only action that changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountState {
    pub count: u64,
    pub increment: Action,
}

/// Handle to a counter store, as bound into a provider's scope.
pub type CountStore = Store<CountState>;

/// Create an independent counter store seeded with `initial_count`.
pub fn create_count_store(initial_count: u64) -> CountStore {
    create_store(|set: SetState<CountState>| CountState {
        count: initial_count,
        increment: Action::new(move || {
            set.set(|state| CountState {
                count: state.count.saturating_add(1),
                ..state.clone()
            })
        }),
    })
}
