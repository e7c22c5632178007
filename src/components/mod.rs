pub mod add_renter_form;
pub mod add_review_form;
pub mod auth_guard;
pub mod forgot_password_form;
pub mod header;
pub mod login_form;
pub mod register_form;
pub mod renter_details;
pub mod renter_reviews;
pub mod report_dialog;
pub mod reset_password_form;
pub mod star_rating;
pub mod verified_info;
pub mod whatsapp_dialog;

/// Loose email shape check shared by the auth forms. The server does the
/// real validation; this only catches obvious typos before a round trip.
pub(crate) fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::looks_like_email;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(looks_like_email("correo@ejemplo.com"));
        assert!(looks_like_email("ana.perez+redibo@sub.dominio.bo"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!looks_like_email(""));
        assert!(!looks_like_email("sin-arroba"));
        assert!(!looks_like_email("con espacios@ejemplo.com"));
        assert!(!looks_like_email("local@"));
        assert!(!looks_like_email("local@sinpunto"));
        assert!(!looks_like_email("local@.com"));
    }
}
