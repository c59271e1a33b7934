//! Page-global helpers the attribute bundle relies on.

/// Installs `elementStyles`, `elementColor`, `elementFont`, `elementBounds`
/// and `imageData` on `window`. Safe to evaluate more than once.
pub const PAGE_HELPERS: &str = r#"(() => {
    const SHORTHANDS = [
        'animation', 'background', 'border', 'border-bottom', 'border-color', 'border-left',
        'border-radius', 'border-right', 'border-style', 'border-top', 'border-width',
        'column-rule', 'columns', 'flex', 'flex-flow', 'font', 'gap', 'grid-area', 'inset',
        'list-style', 'margin', 'outline', 'overflow', 'padding', 'place-content',
        'place-items', 'text-decoration', 'transition'
    ];

    window.elementStyles = (el) => {
        const computed = window.getComputedStyle(el);
        const styles = {};
        for (let i = 0; i < computed.length; i++) {
            const name = computed[i];
            styles[name] = computed.getPropertyValue(name);
        }
        SHORTHANDS.forEach((name) => {
            const value = computed.getPropertyValue(name);
            if (value) {
                styles[name] = value;
            }
        });
        return styles;
    };

    window.elementColor = (styles) => (styles['color'] || null);

    window.elementFont = (styles) => {
        const family = styles['font-family'];
        if (!family) {
            return null;
        }
        return [styles['font-style'], styles['font-weight'], styles['font-size'], family]
            .filter((part) => (part && part !== 'normal'))
            .join(' ');
    };

    window.elementBounds = (el, styles) => {
        const rect = el.getBoundingClientRect();
        return {
            position : { x : rect.left + window.scrollX, y : rect.top + window.scrollY },
            size     : {
                width  : rect.width || parseFloat(styles['width']) || 0,
                height : rect.height || parseFloat(styles['height']) || 0
            }
        };
    };

    window.imageData = (el, size) => {
        const width = Math.round(size.width);
        const height = Math.round(size.height);
        if (!el.complete || width <= 0 || height <= 0) {
            return '';
        }
        const canvas = document.createElement('canvas');
        canvas.width = width;
        canvas.height = height;
        try {
            canvas.getContext('2d').drawImage(el, 0, 0, width, height);
            return canvas.toDataURL('image/png');
        } catch (e) {
            return '';
        }
    };

    return true;
})()"#;

/// Raw computed styles of the document element.
pub const DOCUMENT_STYLES: &str = "elementStyles(document.documentElement)";
