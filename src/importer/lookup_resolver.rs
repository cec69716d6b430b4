// ==========================================
// 资产台账后台 - 参照实体解析器
// ==========================================
// 职责: 名称 → 参照实体 id（厂商/分类/供应商/位置），不存在则创建
// 规则:
// - 匹配键 = TRIM + 小写（大小写不敏感）
// - 创建时使用 TRIM 后的原始大小写名称
// - 导入开始前以库内现有实体预热缓存
// - 同一次导入内，同一匹配键最多创建一次
// 生命周期: 每次导入调用独占一个 LookupResolver，不跨批次共享
// ==========================================

use crate::domain::asset::ReferenceEntity;
use crate::domain::types::ReferenceKind;
use crate::repository::asset_repo::AssetRepository;
use crate::repository::error::RepositoryResult;
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// LookupCache - 单类参照实体缓存
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LookupCache {
    ids: HashMap<String, i64>,
}

impl LookupCache {
    /// 匹配键: TRIM + 小写
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// 以现有实体预热（已存在的键不覆盖）
    pub fn seed(&mut self, entities: &[ReferenceEntity]) {
        for entity in entities {
            let key = Self::normalize(&entity.name);
            if key.is_empty() {
                continue;
            }
            self.ids.entry(key).or_insert(entity.id);
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.ids.get(&Self::normalize(name)).copied()
    }

    pub fn insert(&mut self, name: &str, id: i64) {
        self.ids.insert(Self::normalize(name), id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ==========================================
// LookupResolver
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LookupResolver {
    caches: HashMap<ReferenceKind, LookupCache>,
}

impl LookupResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从仓储加载四类参照实体并预热
    pub async fn seed_from_repository<R>(repo: &R) -> RepositoryResult<Self>
    where
        R: AssetRepository + ?Sized,
    {
        let mut resolver = Self::new();
        for kind in ReferenceKind::ALL {
            let entities = repo.list_references(kind).await?;
            debug!(kind = %kind, count = entities.len(), "预热参照缓存");
            resolver.seed(kind, &entities);
        }
        Ok(resolver)
    }

    pub fn seed(&mut self, kind: ReferenceKind, entities: &[ReferenceEntity]) {
        self.caches.entry(kind).or_default().seed(entities);
    }

    /// 解析名称为 id
    ///
    /// # 返回
    /// - Ok(None): 名称为空（无任何副作用）
    /// - Ok(Some(id)): 命中缓存，或新建后写入缓存
    /// - Err: 仓储失败（缓存不变）
    pub async fn resolve<R>(
        &mut self,
        repo: &R,
        kind: ReferenceKind,
        raw_name: Option<&str>,
    ) -> RepositoryResult<Option<i64>>
    where
        R: AssetRepository + ?Sized,
    {
        let Some(name) = raw_name.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(None);
        };

        let cache = self.caches.entry(kind).or_default();
        if let Some(id) = cache.get(name) {
            return Ok(Some(id));
        }

        let id = repo.create_reference_if_absent(kind, name).await?;
        debug!(kind = %kind, name = name, id = id, "新建参照实体");
        cache.insert(name, id);
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_normalization() {
        let mut cache = LookupCache::default();
        cache.seed(&[
            ReferenceEntity {
                id: 1,
                name: "Dell".to_string(),
            },
            ReferenceEntity {
                id: 2,
                name: "  HP ".to_string(),
            },
        ]);

        assert_eq!(cache.get("DELL"), Some(1));
        assert_eq!(cache.get(" dell "), Some(1));
        assert_eq!(cache.get("hp"), Some(2));
        assert_eq!(cache.get("Lenovo"), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_seed_keeps_first_id() {
        let mut cache = LookupCache::default();
        cache.seed(&[
            ReferenceEntity {
                id: 7,
                name: "Rack A".to_string(),
            },
            ReferenceEntity {
                id: 9,
                name: "rack a".to_string(),
            },
        ]);
        assert_eq!(cache.get("RACK A"), Some(7));
    }
}
