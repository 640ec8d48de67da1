//! The provider set model holds every provider and provider set known to a generation unit.
//! Providers are stored once and referred to by [`ProviderId`], while sets are referred to by
//! their scope and name through a [`SetRef`], since a set may be used before it is declared.

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use location::SpanTuple;
use symbol::Symbol;
use types::{ScopeId, TypeId};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProviderId(u32);

/// A function producing a value of type `out` from values of types `params`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: Symbol,
    pub scope: ScopeId,
    pub location: Option<SpanTuple>,
    pub params: Vec<TypeId>,
    pub out: TypeId,
    /// Does the provider also return an `error`
    pub fallible: bool,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetRef {
    pub scope: ScopeId,
    pub name: Symbol,
}

impl Display for SetRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Provider(ProviderId),
    Set(SetRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSet {
    pub name: Symbol,
    pub scope: ScopeId,
    pub location: Option<SpanTuple>,
    pub members: Vec<Member>,
}

impl ProviderSet {
    pub fn set_ref(&self) -> SetRef {
        SetRef {
            scope: self.scope,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ProviderSetModel {
    providers: Vec<Provider>,
    sets: HashMap<SetRef, ProviderSet>,
}

impl ProviderSetModel {
    pub fn new() -> ProviderSetModel {
        ProviderSetModel::default()
    }

    pub fn add_provider(&mut self, provider: Provider) -> ProviderId {
        let id = ProviderId(self.providers.len() as u32);
        self.providers.push(provider);

        id
    }

    /// Add a set to the model. If a set with the same scope and name already exists, the new
    /// set is handed back
    pub fn add_set(&mut self, set: ProviderSet) -> Result<SetRef, ProviderSet> {
        let key = set.set_ref();

        if self.sets.contains_key(&key) {
            return Err(set);
        }

        self.sets.insert(key.clone(), set);

        Ok(key)
    }

    pub fn provider(&self, id: ProviderId) -> &Provider {
        &self.providers[id.0 as usize]
    }

    pub fn set(&self, set: &SetRef) -> Option<&ProviderSet> {
        self.sets.get(set)
    }

    pub fn providers(&self) -> impl Iterator<Item = (ProviderId, &Provider)> {
        self.providers
            .iter()
            .enumerate()
            .map(|(i, provider)| (ProviderId(i as u32), provider))
    }

    /// Look up a provider by its scope and name
    pub fn lookup_provider(&self, scope: ScopeId, name: &str) -> Option<ProviderId> {
        self.providers()
            .find(|(_, p)| p.scope == scope && p.name.access() == name)
            .map(|(id, _)| id)
    }
}
