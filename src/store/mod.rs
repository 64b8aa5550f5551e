// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON file persistence.
//!
//! Three collections live as pretty-printed JSON arrays under the data
//! directory: `users.json`, `modules.json`, `prompts.json`. A missing file is
//! bootstrapped as an empty array on first read. Writes rewrite the whole
//! file.
//!
//! A process-local mutex serializes read-modify-write cycles so concurrent
//! requests inside one server cannot interleave updates. Separate processes
//! racing on the same files remain unprotected; that is an accepted hazard of
//! the flat-file layout, not a guarantee.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;

use crate::errors::StoreError;
use crate::models::{Module, Prompt, User};
use crate::observability::messages::store::StorageUnavailable;

const USERS_FILE: &str = "users.json";
const MODULES_FILE: &str = "modules.json";
const PROMPTS_FILE: &str = "prompts.json";

pub struct JsonStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        self.read_collection(USERS_FILE).await
    }

    pub async fn load_modules(&self) -> Result<Vec<Module>, StoreError> {
        self.read_collection(MODULES_FILE).await
    }

    pub async fn load_prompts(&self) -> Result<Vec<Prompt>, StoreError> {
        self.read_collection(PROMPTS_FILE).await
    }

    /// Locked read-modify-write over the user collection.
    pub async fn update_users<F, R>(&self, apply: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<User>) -> R,
    {
        self.update_collection(USERS_FILE, apply).await
    }

    /// Locked read-modify-write over the module collection.
    pub async fn update_modules<F, R>(&self, apply: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<Module>) -> R,
    {
        self.update_collection(MODULES_FILE, apply).await
    }

    /// Locked read-modify-write over the prompt collection.
    pub async fn update_prompts<F, R>(&self, apply: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<Prompt>) -> R,
    {
        self.update_collection(PROMPTS_FILE, apply).await
    }

    /// Health probe: the data directory exists (or can be created) and is a
    /// directory.
    pub async fn verify(&self) -> bool {
        if let Err(err) = self.ensure_data_dir().await {
            tracing::error!("{}", StorageUnavailable { error: &err });
            return false;
        }
        match fs::metadata(&self.data_dir).await {
            Ok(meta) => meta.is_dir(),
            Err(err) => {
                tracing::error!("{}", StorageUnavailable { error: &err });
                false
            }
        }
    }

    async fn ensure_data_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.data_dir.clone(),
                source,
            })
    }

    async fn read_collection<T: DeserializeOwned + Serialize>(
        &self,
        file: &str,
    ) -> Result<Vec<T>, StoreError> {
        let path = self.data_dir.join(file);
        match fs::read(&path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                    path: path.clone(),
                    source,
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.ensure_data_dir().await?;
                self.write_file::<T>(&path, &[]).await?;
                Ok(Vec::new())
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    async fn update_collection<T, F, R>(&self, file: &str, apply: F) -> Result<R, StoreError>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_collection(file).await?;
        let result = apply(&mut items);
        let path = self.data_dir.join(file);
        self.write_file(&path, &items).await?;
        Ok(result)
    }

    async fn write_file<T: Serialize>(&self, path: &Path, items: &[T]) -> Result<(), StoreError> {
        self.ensure_data_dir().await?;
        let bytes = serde_json::to_vec_pretty(items).map_err(|source| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, bytes).await.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
