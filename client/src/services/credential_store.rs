//! 加密凭证存储
//!
//! 职责: 令牌与最小身份信息的唯一可信来源
//! - 落盘格式: JSON键值表 → XChaCha20-Poly1305 密封 → base64
//! - 同步读写 (请求头注入等非async上下文可直接调用)
//! - 内存快照通过 watch 通道对外广播,供会话门面组合成流

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::models::{StorageError, User};
use crate::services::api_client::TokenProvider;

/// 加密存储文件名
pub const ENCRYPTED_STORE_NAME: &str = "saborlocal_encrypted_prefs.bin";

/// 主密钥文件名
pub const MASTER_KEY_NAME: &str = "saborlocal_master.key";

const KEY_AUTH_TOKEN: &str = "auth_token";
const KEY_USER_ID: &str = "user_id";
const KEY_USER_NAME: &str = "user_name";
const KEY_USER_EMAIL: &str = "user_email";
const KEY_USER_ROLE: &str = "user_role";

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 24;
const FORMAT_VERSION: u8 = 1;

/// 256位主密钥
///
/// 首次使用时由操作系统随机源生成并单独落盘
#[derive(Clone)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// 读取密钥文件,不存在则生成并写入
    pub fn load_or_create(path: &Path) -> Result<Self, StorageError> {
        if path.exists() {
            let encoded = std::fs::read_to_string(path)?;
            let decoded = STANDARD
                .decode(encoded.trim())
                .map_err(|e| StorageError::KeyUnavailable(format!("密钥文件编码无效: {}", e)))?;
            let bytes: [u8; KEY_LEN] = decoded.try_into().map_err(|v: Vec<u8>| {
                StorageError::KeyUnavailable(format!("密钥长度错误: {} 字节", v.len()))
            })?;
            return Ok(Self(bytes));
        }

        let key = Self::generate();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_key_file(path, STANDARD.encode(key.0).as_bytes())?;

        tracing::info!(path = %path.display(), "Generated new master key");
        Ok(key)
    }

    fn cipher(&self) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new(Key::from_slice(&self.0))
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

/// 新建密钥文件,Unix上创建时即为 0600
fn write_key_file(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}

/// 磁盘上的密封文件
#[derive(Debug, Serialize, Deserialize)]
struct SealedFile {
    version: u8,
    nonce: String,
    ciphertext: String,
}

/// 凭证快照
///
/// 存储内容的只读视图,通过 `subscribe()` 广播
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_role: Option<String>,
}

impl CredentialRecord {
    fn from_entries(entries: &BTreeMap<String, String>) -> Self {
        let field = |key: &str| entries.get(key).cloned();
        Self {
            token: field(KEY_AUTH_TOKEN),
            user_id: field(KEY_USER_ID),
            user_name: field(KEY_USER_NAME),
            user_email: field(KEY_USER_EMAIL),
            user_role: field(KEY_USER_ROLE),
        }
    }

    /// 令牌与 id/email/role 齐全时才构成用户,姓名可缺省
    pub fn user(&self) -> Option<User> {
        self.token.as_ref()?;
        Some(User::new(
            self.user_id.clone()?,
            self.user_name.clone(),
            self.user_email.clone()?,
            self.user_role.clone()?,
        ))
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().map_or(false, |t| !t.is_empty())
    }
}

/// 加密凭证存储
pub struct CredentialStore {
    /// `None` 表示纯内存存储 (测试用)
    path: Option<PathBuf>,
    cipher: XChaCha20Poly1305,
    entries: Mutex<BTreeMap<String, String>>,
    snapshot: watch::Sender<CredentialRecord>,
}

impl CredentialStore {
    /// 打开 `dir` 下的存储,主密钥不存在时自动生成
    pub fn open_in(dir: &Path) -> Result<Self, StorageError> {
        let key = MasterKey::load_or_create(&dir.join(MASTER_KEY_NAME))?;
        Self::open(dir.join(ENCRYPTED_STORE_NAME), &key)
    }

    /// 用指定密钥打开存储文件
    ///
    /// # 错误
    /// - 文件存在但无法读取/解密: 原样返回,不做修复
    pub fn open(path: PathBuf, key: &MasterKey) -> Result<Self, StorageError> {
        let cipher = key.cipher();
        let entries = if path.exists() {
            let raw = std::fs::read(&path)?;
            unseal(&cipher, &raw)?
        } else {
            BTreeMap::new()
        };

        tracing::info!(
            path = %path.display(),
            entries = entries.len(),
            "Credential store opened"
        );

        let (snapshot, _) = watch::channel(CredentialRecord::from_entries(&entries));
        Ok(Self {
            path: Some(path),
            cipher,
            entries: Mutex::new(entries),
            snapshot,
        })
    }

    /// 纯内存存储,使用一次性随机密钥
    pub fn in_memory() -> Self {
        let (snapshot, _) = watch::channel(CredentialRecord::default());
        Self {
            path: None,
            cipher: MasterKey::generate().cipher(),
            entries: Mutex::new(BTreeMap::new()),
            snapshot,
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.entries.lock().get(KEY_AUTH_TOKEN).cloned()
    }

    /// 一次写入令牌与身份
    pub fn save_token(&self, token: &str, user: &User) -> Result<(), StorageError> {
        self.edit(|entries| {
            entries.insert(KEY_AUTH_TOKEN.to_string(), token.to_string());
            write_identity(entries, user);
        })?;
        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            token_len = token.len(),
            "Credentials saved"
        );
        Ok(())
    }

    /// 只替换令牌
    pub fn update_token(&self, token: &str) -> Result<(), StorageError> {
        self.edit(|entries| {
            entries.insert(KEY_AUTH_TOKEN.to_string(), token.to_string());
        })
    }

    /// 只刷新身份,令牌不变
    pub fn update_user_data(&self, user: &User) -> Result<(), StorageError> {
        self.edit(|entries| write_identity(entries, user))?;
        tracing::debug!(user_id = %user.id, "User data refreshed");
        Ok(())
    }

    pub fn get_current_user(&self) -> Option<User> {
        self.record().user()
    }

    pub fn is_logged_in(&self) -> bool {
        self.record().has_token()
    }

    /// 清空整个存储
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.edit(BTreeMap::clear)?;
        tracing::info!("Credentials cleared");
        Ok(())
    }

    /// 当前快照
    pub fn record(&self) -> CredentialRecord {
        CredentialRecord::from_entries(&self.entries.lock())
    }

    /// 订阅快照变更
    pub fn subscribe(&self) -> watch::Receiver<CredentialRecord> {
        self.snapshot.subscribe()
    }

    /// 批量修改: 先落盘,成功后才提交内存并广播
    fn edit<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut guard = self.entries.lock();
        let mut next = guard.clone();
        apply(&mut next);

        if let Some(path) = &self.path {
            let sealed = seal(&self.cipher, &next)?;
            write_atomically(path, &sealed)?;
        }

        let record = CredentialRecord::from_entries(&next);
        *guard = next;
        self.snapshot.send_replace(record);
        Ok(())
    }
}

impl TokenProvider for CredentialStore {
    fn bearer_token(&self) -> Option<String> {
        self.get_token().filter(|t| !t.is_empty())
    }
}

fn write_identity(entries: &mut BTreeMap<String, String>, user: &User) {
    entries.insert(KEY_USER_ID.to_string(), user.id.clone());
    entries.insert(KEY_USER_EMAIL.to_string(), user.email.clone());
    entries.insert(KEY_USER_ROLE.to_string(), user.role.clone());
    match &user.nombre {
        Some(nombre) => {
            entries.insert(KEY_USER_NAME.to_string(), nombre.clone());
        }
        None => {
            entries.remove(KEY_USER_NAME);
        }
    }
}

fn seal(
    cipher: &XChaCha20Poly1305,
    entries: &BTreeMap<String, String>,
) -> Result<Vec<u8>, StorageError> {
    let plaintext = serde_json::to_vec(entries)?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext.as_slice())
        .map_err(|e| StorageError::CryptoFailed(format!("加密失败: {}", e)))?;

    let file = SealedFile {
        version: FORMAT_VERSION,
        nonce: STANDARD.encode(nonce),
        ciphertext: STANDARD.encode(ciphertext),
    };
    Ok(serde_json::to_vec(&file)?)
}

fn unseal(
    cipher: &XChaCha20Poly1305,
    raw: &[u8],
) -> Result<BTreeMap<String, String>, StorageError> {
    let file: SealedFile = serde_json::from_slice(raw)?;
    if file.version != FORMAT_VERSION {
        return Err(StorageError::CryptoFailed(format!(
            "不支持的文件版本: {}",
            file.version
        )));
    }

    let nonce = STANDARD
        .decode(&file.nonce)
        .map_err(|e| StorageError::CryptoFailed(format!("nonce编码无效: {}", e)))?;
    if nonce.len() != NONCE_LEN {
        return Err(StorageError::CryptoFailed(format!(
            "nonce长度错误: {}",
            nonce.len()
        )));
    }
    let ciphertext = STANDARD
        .decode(&file.ciphertext)
        .map_err(|e| StorageError::CryptoFailed(format!("密文编码无效: {}", e)))?;

    let plaintext = cipher
        .decrypt(XNonce::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| StorageError::CryptoFailed("解密失败: 密文损坏或密钥不匹配".to_string()))?;

    Ok(serde_json::from_slice(&plaintext)?)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
