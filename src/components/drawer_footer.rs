//! Drawer Footer Component

use ajax_cart_core::DrawerFooter as FooterView;
use leptos::prelude::*;

/// Total plus cart/checkout links
#[component]
pub fn DrawerFooter(footer: FooterView) -> impl IntoView {
    view! {
        <div class="ajax-cart-footer">
            <div class="ajax-cart-total">
                <span>"Total"</span>
                <strong>{footer.total}</strong>
            </div>
            <div class="ajax-cart-actions">
                {footer
                    .links
                    .into_iter()
                    .map(|link| {
                        let class = if link.primary { "ajax-cart-btn primary" } else { "ajax-cart-btn secondary" };
                        view! { <a href=link.href class=class>{link.label}</a> }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
