/// ドメインエンティティ
pub mod entities;
