//! Forms of signing in, registration and profile editing.

use secrecy::{ExposeSecret as _, SecretBox, SecretString};

use crate::{
    command::{SignIn, SignUp, UpdateProfile},
    domain::user::{
        Email, Name, Password, Phone, Profile, ProfileUpdate, Registration,
        Role,
    },
};

use super::{FieldErrors, Validate};

/// Message of an invalid [`Email`].
const INVALID_EMAIL: &str = "Enter a valid email address";

/// Message of an invalid [`Password`].
const INVALID_PASSWORD: &str = "Password must be 6 to 128 characters long";

/// Message of an invalid [`Name`].
const INVALID_NAME: &str = "Name must be 1 to 100 characters long";

/// Raw values of the sign in form.
#[derive(Debug)]
pub struct LoginForm {
    /// Typed email address.
    pub email: String,

    /// Typed password.
    pub password: SecretString,
}

impl LoginForm {
    /// Creates a new [`LoginForm`] with the provided values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let password: String = password.into();
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Validate for LoginForm {
    type Valid = SignIn;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let email = errs.required::<Email>("email", &self.email, INVALID_EMAIL);
        let password = errs.check(
            "password",
            Password::new(self.password.expose_secret()),
            INVALID_PASSWORD,
        );
        errs.finish(|| {
            Some(SignIn {
                email: email?,
                password: SecretBox::new(Box::new(password?)),
            })
        })
    }
}

/// Raw values of the registration form.
#[derive(Debug)]
pub struct RegisterForm {
    /// Typed email address.
    pub email: String,

    /// Typed password.
    pub password: SecretString,

    /// Typed password confirmation.
    pub confirm_password: SecretString,

    /// Typed first name.
    pub first_name: String,

    /// Typed last name.
    pub last_name: String,

    /// Chosen [`Role`] in `kebab-case`.
    pub role: String,
}

impl Validate for RegisterForm {
    type Valid = SignUp;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let email = errs.required::<Email>("email", &self.email, INVALID_EMAIL);
        let password = errs.check(
            "password",
            Password::new(self.password.expose_secret()),
            INVALID_PASSWORD,
        );
        if self.password.expose_secret()
            != self.confirm_password.expose_secret()
        {
            errs.add("confirm_password", "Passwords do not match");
        }
        let first_name =
            errs.required::<Name>("first_name", &self.first_name, INVALID_NAME);
        let last_name =
            errs.required::<Name>("last_name", &self.last_name, INVALID_NAME);
        let role = errs.required::<Role>(
            "role",
            &self.role,
            "Choose either tenant or owner",
        );
        if role == Some(Role::Admin) {
            errs.add("role", "Administrators cannot register themselves");
        }
        errs.finish(|| {
            Some(SignUp(Registration {
                email: email?,
                password: SecretBox::new(Box::new(password?)),
                first_name: first_name?,
                last_name: last_name?,
                role: role?,
            }))
        })
    }
}

/// Raw values of the profile form.
#[derive(Clone, Debug, Default)]
pub struct ProfileForm {
    /// Typed first name.
    pub first_name: String,

    /// Typed last name.
    pub last_name: String,

    /// Typed phone number, may be blank.
    pub phone: String,
}

impl From<&Profile> for ProfileForm {
    fn from(profile: &Profile) -> Self {
        let text = |v: Option<&Name>| v.map(ToString::to_string);
        Self {
            first_name: text(profile.first_name.as_ref()).unwrap_or_default(),
            last_name: text(profile.last_name.as_ref()).unwrap_or_default(),
            phone: profile
                .phone
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

impl Validate for ProfileForm {
    type Valid = UpdateProfile;

    fn validate(&self) -> Result<Self::Valid, FieldErrors> {
        let mut errs = FieldErrors::default();
        let first_name =
            errs.required::<Name>("first_name", &self.first_name, INVALID_NAME);
        let last_name =
            errs.required::<Name>("last_name", &self.last_name, INVALID_NAME);
        let phone = errs.optional::<Phone>(
            "phone",
            &self.phone,
            "Enter a valid phone number",
        );
        errs.finish(|| {
            Some(UpdateProfile(ProfileUpdate {
                first_name: first_name?,
                last_name: last_name?,
                phone: phone?,
            }))
        })
    }
}

#[cfg(test)]
mod spec {
    use secrecy::ExposeSecret as _;

    use crate::domain::user::Role;

    use super::{LoginForm, ProfileForm, RegisterForm, Validate};

    #[test]
    fn login_requires_email_and_password() {
        let errs = LoginForm::new("", "123").validate().unwrap_err();

        assert_eq!(errs.get("email"), ["This field is required"]);
        assert_eq!(
            errs.get("password"),
            ["Password must be 6 to 128 characters long"],
        );

        let cmd = LoginForm::new(" user@example.com ", "secret1")
            .validate()
            .unwrap();
        assert_eq!(cmd.email.to_string(), "user@example.com");
        assert_eq!(cmd.password.expose_secret().as_str(), "secret1");
    }

    #[test]
    fn registration_checks_confirmation_and_role() {
        let form = RegisterForm {
            email: "new@example.com".into(),
            password: "secret1".to_owned().into(),
            confirm_password: "secret2".to_owned().into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            role: "admin".into(),
        };
        let errs = form.validate().unwrap_err();
        assert_eq!(errs.get("confirm_password").len(), 1);
        assert_eq!(errs.get("role").len(), 1);

        let form = RegisterForm {
            confirm_password: "secret1".to_owned().into(),
            role: "owner".into(),
            ..form
        };
        assert_eq!(form.validate().unwrap().0.role, Role::Owner);
    }

    #[test]
    fn profile_phone_is_optional() {
        let mut form = ProfileForm {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            phone: String::new(),
        };
        assert!(form.validate().unwrap().0.phone.is_none());

        form.phone = "12".into();
        assert_eq!(form.validate().unwrap_err().get("phone").len(), 1);
    }
}
