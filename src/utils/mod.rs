mod bin_coder;
mod ident;

pub use ident::*;

use crate::db_error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// 实现一个特征，用于注入快照的序列化与反序列化方法
pub trait Value: Serialize + DeserializeOwned {
    fn decode(bytes: &[u8]) -> Result<Self> {
        bin_coder::decode(bytes)
    }

    fn encode_into<W, T>(writer: &mut W, value: &T) -> Result<()>
    where
        W: std::io::Write,
        T: Serialize + ?Sized,
    {
        bin_coder::encode_into(writer, value)
    }
}

/// 列集合直接作为快照编解码
impl<V: Value> Value for Vec<V> {}
