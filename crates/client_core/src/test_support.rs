use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use shared::domain::{DeletedUser, NewUser, User, UserId, UserRef, UserUpdate};
use tokio::sync::{Mutex, Notify};

use crate::{
    error::{ClientError, Result},
    gateway::DataGateway,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListUsers,
    UserByName(String),
    Create(NewUser),
    Update(UserUpdate),
    Delete(UserId),
}

/// In-memory users backend that records every call and every completion.
#[derive(Default)]
pub struct ScriptedGateway {
    users: Mutex<Vec<User>>,
    next_id: Mutex<i64>,
    calls: Mutex<Vec<Call>>,
    journal: Mutex<Vec<String>>,
    fail_reads: Mutex<Option<ClientError>>,
    fail_writes: Mutex<Option<ClientError>>,
    lookup_gates: Mutex<HashMap<String, Arc<Notify>>>,
    list_gate: Mutex<Option<Arc<Notify>>>,
    write_gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedGateway {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        let next_id = users.iter().map(|user| user.id.0).max().unwrap_or(0) + 1;
        Arc::new(Self {
            users: Mutex::new(users),
            next_id: Mutex::new(next_id),
            ..Self::default()
        })
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn journal(&self) -> Vec<String> {
        self.journal.lock().await.clone()
    }

    pub async fn fail_reads_with(&self, err: ClientError) {
        *self.fail_reads.lock().await = Some(err);
    }

    pub async fn restore_reads(&self) {
        *self.fail_reads.lock().await = None;
    }

    pub async fn fail_writes_with(&self, err: ClientError) {
        *self.fail_writes.lock().await = Some(err);
    }

    /// Holds lookups for `name` until the returned handle is notified.
    pub async fn gate_lookup(&self, name: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lookup_gates
            .lock()
            .await
            .insert(name.to_string(), Arc::clone(&gate));
        gate
    }

    /// Holds the next list read, after it has copied the backend rows, until
    /// the returned handle is notified.
    pub async fn gate_next_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.list_gate.lock().await = Some(Arc::clone(&gate));
        gate
    }

    /// Holds every write until the returned handle is notified.
    pub async fn gate_writes(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.write_gate.lock().await = Some(Arc::clone(&gate));
        gate
    }

    async fn begin(&self, call: Call, label: &str) {
        self.calls.lock().await.push(call);
        self.journal.lock().await.push(format!("{label}:start"));
    }

    async fn finish(&self, label: &str) {
        self.journal.lock().await.push(format!("{label}:done"));
    }

    async fn before_write(&self) -> Result<()> {
        let gate = self.write_gate.lock().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.fail_writes.lock().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn before_read(&self) -> Result<()> {
        match self.fail_reads.lock().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataGateway for ScriptedGateway {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.begin(Call::ListUsers, "list").await;
        let users = self.users.lock().await.clone();
        let gate = self.list_gate.lock().await.take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let outcome = self.before_read().await.map(|()| users);
        self.finish("list").await;
        outcome
    }

    async fn user_by_name(&self, name: &str) -> Result<Option<User>> {
        self.begin(Call::UserByName(name.to_string()), "lookup").await;
        let gate = self.lookup_gates.lock().await.get(name).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.before_read().await?;
        let found = self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.name == name)
            .cloned();
        self.finish("lookup").await;
        Ok(found)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRef> {
        self.begin(Call::Create(user.clone()), "create").await;
        self.before_write().await?;
        let id = {
            let mut next_id = self.next_id.lock().await;
            let id = UserId((*next_id).max(1));
            *next_id = id.0 + 1;
            id
        };
        self.users.lock().await.push(User {
            id,
            name: user.name.clone(),
            age: user.age,
            country: user.country,
        });
        self.finish("create").await;
        Ok(UserRef {
            id,
            name: user.name,
        })
    }

    async fn update_user(&self, update: UserUpdate) -> Result<UserRef> {
        self.begin(Call::Update(update.clone()), "update").await;
        self.before_write().await?;
        let mut users = self.users.lock().await;
        let Some(user) = users.iter_mut().find(|user| user.id == update.id) else {
            return Err(ClientError::NotFound {
                what: format!("user {}", update.id),
            });
        };
        user.name = update.name.clone();
        user.age = update.age;
        user.country = update.country;
        drop(users);
        self.finish("update").await;
        Ok(UserRef {
            id: update.id,
            name: update.name,
        })
    }

    async fn delete_user(&self, id: UserId) -> Result<DeletedUser> {
        self.begin(Call::Delete(id), "delete").await;
        self.before_write().await?;
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|user| user.id != id);
        if users.len() == before {
            return Err(ClientError::NotFound {
                what: format!("user {id}"),
            });
        }
        drop(users);
        self.finish("delete").await;
        Ok(DeletedUser { id })
    }
}

pub fn user(id: i64, name: &str, age: i32, country: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        age,
        country: country.to_string(),
    }
}
