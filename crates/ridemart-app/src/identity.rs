//! Current session identity

use ridemart_types::Identity;
use tracing::info;

#[derive(Debug, Default)]
pub struct IdentityHolder {
    current: Option<Identity>,
}

impl IdentityHolder {
    /// Replaces any current identity. A blank name leaves the holder unchanged.
    pub fn login(&mut self, name: &str, is_dealer: bool) -> Option<&Identity> {
        let identity = Identity::new(name, is_dealer)?;
        info!(name = %identity.name, dealer = identity.is_dealer, "logged in");
        self.current = Some(identity);
        self.current.as_ref()
    }

    pub fn logout(&mut self) -> Option<Identity> {
        let previous = self.current.take();
        if let Some(ref identity) = previous {
            info!(name = %identity.name, "logged out");
        }
        previous
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_dealer(&self) -> bool {
        self.current.as_ref().is_some_and(|i| i.is_dealer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let mut holder = IdentityHolder::default();
        assert!(holder.login("  ", true).is_none());
        assert!(holder.current().is_none());

        holder.login("Ravi", true);
        assert!(holder.is_dealer());
        assert_eq!(holder.logout().map(|i| i.name), Some("Ravi".to_string()));
        assert!(!holder.is_dealer());
        assert!(holder.logout().is_none());
    }
}
