//! 공유(싱글톤) 인스턴스 캐시
//!
//! 생성된 접근자 타입과 인메모리 와이어링이 함께 사용하는 캐시입니다.
//! 서비스 이름마다 `OnceCell` 하나를 두어, 동시에 첫 접근이 일어나도
//! 인스턴스는 최대 한 번만 생성됩니다. 맵 잠금은 셀을 꺼내는 동안만 유지되므로
//! 생성 도중 다른 서비스를 재진입 생성해도 교착되지 않습니다.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use once_cell::sync::OnceCell;

use crate::core::errors::ServiceResult;
use crate::core::factory::Instance;

#[derive(Debug, Default)]
pub struct SharedInstances {
    cells: RwLock<HashMap<String, Arc<OnceCell<Instance>>>>,
}

impl SharedInstances {
    pub fn new() -> Self {
        Self::default()
    }

    /// 캐시된 인스턴스를 반환하고, 없으면 `construct`로 생성해 저장합니다.
    ///
    /// 생성에 실패하면 아무것도 저장하지 않으므로 다음 호출에서 다시 시도합니다.
    pub fn get_or_construct<F>(&self, name: &str, construct: F) -> ServiceResult<Instance>
    where
        F: FnOnce() -> ServiceResult<Instance>,
    {
        let cell = self.cell(name);
        let instance = cell.get_or_try_init(|| {
            debug!("Creating shared instance: {}", name);
            construct()
        })?;
        Ok(Arc::clone(instance))
    }

    fn cell(&self, name: &str) -> Arc<OnceCell<Instance>> {
        {
            let cells = self.cells.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cell) = cells.get(name) {
                return Arc::clone(cell);
            }
        }

        let mut cells = self.cells.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(name.to_string()).or_default())
    }

    /// 이미 생성된 인스턴스가 있는지 확인합니다.
    pub fn contains(&self, name: &str) -> bool {
        self.cells
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .is_some_and(|cell| cell.get().is_some())
    }

    /// 생성된 인스턴스 수
    pub fn len(&self) -> usize {
        self.cells
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 캐시에서 인스턴스를 제거합니다. 다음 접근 시 새로 생성됩니다.
    pub fn forget(&self, name: &str) -> bool {
        self.cells
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some_and(|cell| cell.get().is_some())
    }
}
