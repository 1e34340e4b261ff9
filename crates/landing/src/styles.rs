/// Stylesheet for button ripples, injected into `<head>` once per page.
pub const RIPPLE_CSS: &str = r#"
    .btn-primary, .nav-cta {
        position: relative;
        overflow: hidden;
    }

    .ripple {
        position: absolute;
        border-radius: 50%;
        background: rgba(255, 255, 255, 0.3);
        transform: scale(0);
        animation: ripple-animation 0.6s ease-out;
        pointer-events: none;
    }

    @keyframes ripple-animation {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
"#;

/// Marker attribute set on the injected `<style>` element.
pub const STYLE_MARKER_ATTR: &str = "data-landing-styles";
