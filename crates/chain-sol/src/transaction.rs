//! Legacy Solana transaction wire format for native SOL transfers.
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures
//!   message:
//!     num_required_sigs     u8
//!     num_readonly_signed   u8
//!     num_readonly_unsigned u8
//!     num_accounts          compact-u16
//!     account_keys          32 bytes * num_accounts
//!     recent_blockhash      32 bytes
//!     num_instructions      compact-u16
//!     instructions[]        (see below)
//!
//! Instruction:
//!   program_id_index        u8
//!   num_accounts            compact-u16
//!   account_indices         u8 * num_accounts
//!   data_len                compact-u16
//!   data                    u8 * data_len
//! ```

use crate::address::Pubkey;
use crate::amount::Lamports;
use crate::error::SolError;
use crate::keypair::Keypair;

/// The System Program: 32 zero bytes, `11111111111111111111111111111111`.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new([0u8; 32]);

/// System Program `Transfer` instruction index (little-endian u32).
const SYSTEM_TRANSFER_IX_INDEX: u32 = 2;

const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Compact-u16 encoding
// ---------------------------------------------------------------------------

/// Encode a `u16` in Solana's compact-u16 (7 bits per byte, high bit =
/// continuation) format.
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut rest = u32::from(value);
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (rest & 0x7f) as u8;
        rest >>= 7;
        if rest != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if rest == 0 {
            return out;
        }
    }
}

/// Decode a compact-u16 from the front of `data`.
///
/// Returns `(value, bytes_consumed)`.
pub fn decode_compact_u16(data: &[u8]) -> Result<(u16, usize), SolError> {
    let mut value: u32 = 0;

    for (i, &byte) in data.iter().take(3).enumerate() {
        value |= u32::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            let value = u16::try_from(value).map_err(|_| {
                SolError::SerializationError("compact-u16 value overflow".into())
            })?;
            return Ok((value, i + 1));
        }
    }

    Err(SolError::SerializationError(
        "truncated or oversized compact-u16".into(),
    ))
}

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// A single account reference in an instruction.
#[derive(Debug, Clone)]
pub struct SolAccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// An instruction before it is compiled into a message.
#[derive(Debug, Clone)]
pub struct SolInstruction {
    pub program_id: Pubkey,
    pub accounts: Vec<SolAccountMeta>,
    pub data: Vec<u8>,
}

/// An unsigned, compiled transaction message.
#[derive(Debug, Clone)]
pub struct SolTransaction {
    /// Account keys in canonical order: writable signers, read-only signers,
    /// writable non-signers, read-only non-signers. Fee payer is index 0.
    pub account_keys: Vec<Pubkey>,

    pub num_required_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,

    pub recent_blockhash: [u8; 32],

    pub compiled_instructions: Vec<CompiledInstruction>,
}

/// An instruction whose accounts are indices into `account_keys`.
#[derive(Debug, Clone)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Transaction building
// ---------------------------------------------------------------------------

/// Build a System Program transfer of `lamports` from `from` to `to`, paid
/// for by `from`.
pub fn build_sol_transfer(
    from: &Pubkey,
    to: &Pubkey,
    lamports: Lamports,
    recent_blockhash: &[u8; 32],
) -> Result<SolTransaction, SolError> {
    if lamports == 0 {
        return Err(SolError::TransactionBuildError(
            "lamports must be > 0".into(),
        ));
    }

    let instruction = system_transfer_instruction(from, to, lamports);
    compile_transaction(&[instruction], from, recent_blockhash)
}

/// Compile instructions into a message with a single fee payer.
pub fn compile_transaction(
    instructions: &[SolInstruction],
    fee_payer: &Pubkey,
    recent_blockhash: &[u8; 32],
) -> Result<SolTransaction, SolError> {
    struct AccountEntry {
        pubkey: Pubkey,
        is_signer: bool,
        is_writable: bool,
    }

    fn rank(e: &AccountEntry) -> u8 {
        match (e.is_signer, e.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }

    // Instruction account lists are tiny; a Vec keeps insertion order.
    let mut entries: Vec<AccountEntry> = Vec::new();
    let mut upsert = |pubkey: Pubkey, signer: bool, writable: bool| {
        match entries.iter_mut().find(|e| e.pubkey == pubkey) {
            Some(entry) => {
                entry.is_signer |= signer;
                entry.is_writable |= writable;
            }
            None => entries.push(AccountEntry {
                pubkey,
                is_signer: signer,
                is_writable: writable,
            }),
        }
    };

    upsert(*fee_payer, true, true);
    for ix in instructions {
        for meta in &ix.accounts {
            upsert(meta.pubkey, meta.is_signer, meta.is_writable);
        }
        upsert(ix.program_id, false, false);
    }

    // Stable sort: the fee payer, inserted first as a writable signer, stays
    // at index 0.
    entries.sort_by_key(rank);

    let count = |pred: fn(&AccountEntry) -> bool| -> Result<u8, SolError> {
        u8::try_from(entries.iter().filter(|e| pred(e)).count())
            .map_err(|_| SolError::TransactionBuildError("too many accounts".into()))
    };
    let num_required_signatures = count(|e| e.is_signer)?;
    let num_readonly_signed = count(|e| e.is_signer && !e.is_writable)?;
    let num_readonly_unsigned = count(|e| !e.is_signer && !e.is_writable)?;

    let account_keys: Vec<Pubkey> = entries.iter().map(|e| e.pubkey).collect();
    let index_of = |key: &Pubkey| -> Result<u8, SolError> {
        account_keys
            .iter()
            .position(|k| k == key)
            .and_then(|i| u8::try_from(i).ok())
            .ok_or_else(|| SolError::TransactionBuildError(format!("{key} not in account keys")))
    };

    let compiled = instructions
        .iter()
        .map(|ix| -> Result<CompiledInstruction, SolError> {
            Ok(CompiledInstruction {
                program_id_index: index_of(&ix.program_id)?,
                account_indices: ix
                    .accounts
                    .iter()
                    .map(|meta| index_of(&meta.pubkey))
                    .collect::<Result<Vec<u8>, SolError>>()?,
                data: ix.data.clone(),
            })
        })
        .collect::<Result<Vec<_>, SolError>>()?;

    Ok(SolTransaction {
        account_keys,
        num_required_signatures,
        num_readonly_signed,
        num_readonly_unsigned,
        recent_blockhash: *recent_blockhash,
        compiled_instructions: compiled,
    })
}

/// Serialize the message (the bytes that get signed).
pub fn serialize_message(tx: &SolTransaction) -> Result<Vec<u8>, SolError> {
    let mut buf = Vec::with_capacity(256);

    buf.push(tx.num_required_signatures);
    buf.push(tx.num_readonly_signed);
    buf.push(tx.num_readonly_unsigned);

    buf.extend_from_slice(&encode_len(tx.account_keys.len())?);
    for key in &tx.account_keys {
        buf.extend_from_slice(key.as_bytes());
    }

    buf.extend_from_slice(&tx.recent_blockhash);

    buf.extend_from_slice(&encode_len(tx.compiled_instructions.len())?);
    for ix in &tx.compiled_instructions {
        buf.push(ix.program_id_index);
        buf.extend_from_slice(&encode_len(ix.account_indices.len())?);
        buf.extend_from_slice(&ix.account_indices);
        buf.extend_from_slice(&encode_len(ix.data.len())?);
        buf.extend_from_slice(&ix.data);
    }

    Ok(buf)
}

/// Sign a single-signer transaction and return its wire bytes, ready for
/// `sendTransaction`.
pub fn sign_transaction(tx: &SolTransaction, signer: &Keypair) -> Result<Vec<u8>, SolError> {
    if tx.num_required_signatures != 1 {
        return Err(SolError::SigningError(format!(
            "expected 1 required signature, found {}",
            tx.num_required_signatures
        )));
    }
    if tx.account_keys.first() != Some(&signer.pubkey()) {
        return Err(SolError::SigningError(
            "signer is not the transaction fee payer".into(),
        ));
    }

    let message = serialize_message(tx)?;
    let signature = signer.sign(&message);

    let mut wire = Vec::with_capacity(1 + SIGNATURE_LENGTH + message.len());
    wire.extend_from_slice(&encode_compact_u16(1));
    wire.extend_from_slice(&signature);
    wire.extend_from_slice(&message);
    Ok(wire)
}

/// The transaction id: Base58 of the first signature in the wire bytes.
pub fn transaction_id(wire: &[u8]) -> Result<String, SolError> {
    let (num_sigs, offset) = decode_compact_u16(wire)?;
    if num_sigs == 0 {
        return Err(SolError::SerializationError(
            "transaction has zero signatures".into(),
        ));
    }
    let first = wire.get(offset..offset + SIGNATURE_LENGTH).ok_or_else(|| {
        SolError::SerializationError("transaction too short for signature".into())
    })?;
    Ok(bs58::encode(first).into_string())
}

fn encode_len(len: usize) -> Result<Vec<u8>, SolError> {
    u16::try_from(len)
        .map(encode_compact_u16)
        .map_err(|_| SolError::SerializationError(format!("length {len} exceeds compact-u16")))
}

/// Instruction data: u32 LE instruction index (2 = Transfer) + u64 LE lamports.
fn system_transfer_instruction(from: &Pubkey, to: &Pubkey, lamports: Lamports) -> SolInstruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&SYSTEM_TRANSFER_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    SolInstruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            SolAccountMeta {
                pubkey: *from,
                is_signer: true,
                is_writable: true,
            },
            SolAccountMeta {
                pubkey: *to,
                is_signer: false,
                is_writable: true,
            },
        ],
        data,
    }
}
