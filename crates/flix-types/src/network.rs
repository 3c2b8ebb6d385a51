//! Network contract addresses and Cadence import resolution.

use crate::error::{Result, TypesError};
use crate::template::TemplateDescriptor;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

pub const MAINNET: &str = "mainnet";
pub const TESTNET: &str = "testnet";
pub const EMULATOR: &str = "emulator";

/// Core contracts deployed on every public network.
static CORE_CONTRACTS: Lazy<HashMap<&'static str, [(&'static str, &'static str); 3]>> = Lazy::new(|| {
    let hybrid_custody = [
        (MAINNET, "0xd8a7e05a7ac670c0"),
        (TESTNET, "0x294e44e1ec6993c6"),
        (EMULATOR, "0xf8d6e0586b0a20c7"),
    ];
    HashMap::from([
        (
            "FungibleToken",
            [(MAINNET, "0xf233dcee88fe0abe"), (TESTNET, "0x9a0766d93b6608b7"), (EMULATOR, "0xee82856bf20e2aa6")],
        ),
        (
            "FlowToken",
            [(MAINNET, "0x1654653399040a61"), (TESTNET, "0x7e60df042a9c0868"), (EMULATOR, "0x0ae53cb6e3f42a79")],
        ),
        (
            "NonFungibleToken",
            [(MAINNET, "0x1d7e57aa55817448"), (TESTNET, "0x631e88ae7f1d7c20"), (EMULATOR, "0xf8d6e0586b0a20c7")],
        ),
        (
            "MetadataViews",
            [(MAINNET, "0x1d7e57aa55817448"), (TESTNET, "0x631e88ae7f1d7c20"), (EMULATOR, "0xf8d6e0586b0a20c7")],
        ),
        ("HybridCustody", hybrid_custody),
        ("CapabilityDelegator", hybrid_custody),
        ("CapabilityFactory", hybrid_custody),
        ("CapabilityFilter", hybrid_custody),
    ])
});

/// `import "Name"`, `import Name from "Name"` and `import Name from 0xPLACEHOLDER`.
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+(?:(\w+)\s+from\s+)?(?:"([\w.]+)"|(0x\w+))"#).expect("valid import regex")
});

/// Address of a core contract on a network.
pub fn core_contract_address(contract: &str, network: &str) -> Option<&'static str> {
    CORE_CONTRACTS
        .get(contract)?
        .iter()
        .find(|(name, _)| *name == network)
        .map(|(_, address)| *address)
}

/// Left-pad a hex address to 8 bytes and prefix it with `0x`.
///
/// Strings that are not hex are returned unchanged.
pub fn normalize_address(address: &str) -> String {
    let digits = address.trim_start_matches("0x");
    if digits.is_empty() || digits.len() > 16 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return address.to_string();
    }
    format!("0x{:0>16}", digits)
}

impl TemplateDescriptor {
    /// Address of an imported contract on `network`.
    ///
    /// The template's own dependency list wins over the core contract table.
    pub fn contract_address(&self, contract: &str, network: &str) -> Result<String> {
        self.dependency(contract)
            .and_then(|d| d.networks.get(network).cloned())
            .or_else(|| core_contract_address(contract, network).map(str::to_string))
            .ok_or_else(|| TypesError::UnresolvedImport {
                network: network.to_string(),
                contract: contract.to_string(),
            })
    }

    /// Cadence body with every import pointed at `network`.
    pub fn resolve_imports(&self, network: &str) -> Result<String> {
        let mut resolved = String::with_capacity(self.cadence.len());
        let mut last = 0;

        for caps in IMPORT_RE.captures_iter(&self.cadence) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let Some(replacement) = self.resolve_import(&caps, network)? else {
                continue;
            };
            resolved.push_str(&self.cadence[last..whole.start()]);
            resolved.push_str(&replacement);
            last = whole.end();
        }
        resolved.push_str(&self.cadence[last..]);

        Ok(resolved)
    }

    fn resolve_import(&self, caps: &Captures<'_>, network: &str) -> Result<Option<String>> {
        let identifier = caps.get(1).map(|m| m.as_str());

        if let Some(contract) = caps.get(2).map(|m| m.as_str()) {
            let address = self.contract_address(contract, network)?;
            let name = identifier.unwrap_or(contract);
            return Ok(Some(format!("import {} from {}", name, normalize_address(&address))));
        }

        // `import Name from 0x...`: only placeholders declared by the template are rewritten.
        let (Some(name), Some(address)) = (identifier, caps.get(3).map(|m| m.as_str())) else {
            return Ok(None);
        };
        let is_placeholder = self
            .dependency(name)
            .and_then(|d| d.placeholder.as_deref())
            .map_or(false, |p| p == address);
        if !is_placeholder {
            return Ok(None);
        }

        let resolved = self.contract_address(name, network)?;
        Ok(Some(format!("import {} from {}", name, normalize_address(&resolved))))
    }
}
