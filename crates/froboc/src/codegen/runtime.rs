//! The reactive runtime placed at the top of every script.
//!
//! The runtime is a single `Frobo` object. State lives behind a proxy that queues every written
//! key and calls the watchers of that key right away. Queued keys are flushed once per animation
//! frame, re-rendering templates, bindings, conditionals and loops. Computed values are never
//! written, so every flush also re-renders whatever depends on them.

/// The runtime object, written before anything else in the script
pub const RUNTIME: &str = r#"const Frobo = {
  state: {},
  dependencies: {},
  domBindings: [],
  updateQueue: new Set(),
  updateScheduled: false,
  watchers: {},
  updateHooks: [],
  computedKeys: [],

  createState(initialState) {
    const self = this;
    this.state = new Proxy(initialState, {
      set: (target, property, value) => {
        const oldValue = target[property];
        target[property] = value;
        self.scheduleUpdate(property);
        if (self.watchers[property]) {
          self.watchers[property].forEach(callback => callback(value, oldValue));
        }
        return true;
      }
    });
    return this.state;
  },

  addWatcher(stateKey, callback) {
    if (!this.watchers[stateKey]) {
      this.watchers[stateKey] = [];
    }
    this.watchers[stateKey].push(callback);
  },

  onUpdate(callback) {
    this.updateHooks.push(callback);
  },

  watch(stateKey, element) {
    if (!this.dependencies[stateKey]) {
      this.dependencies[stateKey] = [];
    }
    this.dependencies[stateKey].push(element);
  },

  resolve(path) {
    return path.split('.').reduce((value, key) => value == null ? undefined : value[key], this.state);
  },

  escapeHTML(text) {
    const map = { '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#039;' };
    return String(text).replace(/[&<>"']/g, char => map[char]);
  },

  scheduleUpdate(stateKey) {
    const self = this;
    this.updateQueue.add(stateKey);
    if (!this.updateScheduled) {
      this.updateScheduled = true;
      requestAnimationFrame(() => {
        self.flushUpdates();
      });
    }
  },

  flushUpdates() {
    const self = this;
    this.updateQueue.forEach(key => {
      self.updateDOM(key);
    });
    this.computedKeys.forEach(key => {
      if (!self.updateQueue.has(key)) self.updateDOM(key);
    });
    this.updateQueue.clear();
    this.updateScheduled = false;
    this.updateHooks.forEach(hook => hook());
  },

  updateDOM(stateKey) {
    const self = this;
    const elements = this.dependencies[stateKey];
    if (elements) {
      elements.forEach(element => {
        const template = element.getAttribute('data-template');
        if (template) {
          let result = template;
          const vars = element.getAttribute('data-vars');
          if (vars) {
            vars.split(',').forEach(path => {
              result = result.split('{' + path + '}').join(String(self.resolve(path)));
            });
          }
          element.textContent = result;
        }
      });
    }
    this.domBindings
      .filter(binding => binding.stateKey === stateKey)
      .forEach(binding => {
        if (self.state[stateKey] !== undefined) {
          if (binding.property === 'textContent') {
            binding.element.textContent = String(self.state[stateKey]);
          } else if (binding.property === 'value') {
            binding.element.value = String(self.state[stateKey]);
          } else {
            binding.element.setAttribute(binding.property, String(self.state[stateKey]));
          }
        }
      });

    // Re-evaluate conditionals
    if (this.conditionals) {
      this.conditionals.forEach(evaluate => evaluate());
    }

    // Re-render loops
    if (this.renderLoops) {
      this.renderLoops();
    }
  },

  bind(elementId, stateKey, property = 'textContent') {
    const element = document.getElementById(elementId);
    if (element) {
      this.domBindings.push({ element, property, stateKey });
      this.updateDOM(stateKey);
    }
  },

  on(elementId, eventType, handler) {
    const element = document.getElementById(elementId);
    if (element) {
      element.addEventListener(eventType, handler);
    }
  },

  onClick(elementId, handler) {
    this.on(elementId, 'click', handler);
  },

  onChange(elementId, handler) {
    const element = document.getElementById(elementId);
    if (element && (element instanceof HTMLInputElement || element instanceof HTMLTextAreaElement)) {
      const updateHandler = (event) => {
        handler(event.target.value);
      };
      element.addEventListener('change', updateHandler);
      element.addEventListener('input', updateHandler);
    }
  }
};"#;

/// Declared once when any component fetches data. Network and decoding failures end up in the
/// error key instead of propagating.
pub const FETCH_HELPER: &str = r#"async function froboFetch(url, intoVar, loadingVar, errorVar) {
  if (loadingVar) state[loadingVar] = true;
  if (errorVar) state[errorVar] = null;
  try {
    const response = await fetch(url);
    const data = await response.json();
    if (intoVar) state[intoVar] = data;
    if (loadingVar) state[loadingVar] = false;
    return data;
  } catch (error) {
    if (errorVar) state[errorVar] = error.message;
    if (loadingVar) state[loadingVar] = false;
    console.error('Fetch error:', error);
  }
}"#;

/// Toggles the classes of every `data-dynamic-class` element as their conditions change
pub const DYNAMIC_CLASSES: &str = r#"  // Setup dynamic classes
  document.querySelectorAll('[data-dynamic-class]').forEach(el => {
    const classMap = JSON.parse(el.getAttribute('data-dynamic-class'));
    const updateClasses = () => {
      Object.entries(classMap).forEach(([className, condition]) => {
        if (Frobo.resolve(condition)) {
          el.classList.add(className);
        } else {
          el.classList.remove(className);
        }
      });
    };
    updateClasses();
    Object.values(classMap).forEach(condition => {
      Frobo.addWatcher(condition.split('.')[0], updateClasses);
    });
  });
"#;

/// Re-renders every template element when any of its variables changes
pub const TEXT_WATCHERS: &str = r#"  // Setup text element watchers
  document.querySelectorAll('[data-vars]').forEach(el => {
    const vars = el.getAttribute('data-vars').split(',');
    const roots = [...new Set(vars.map(path => path.split('.')[0]))];
    roots.forEach(varName => {
      Frobo.watch(varName, el);
    });
    // Initial update
    if (roots.length > 0) Frobo.updateDOM(roots[0]);
  });
"#;

/// Shows the first branch of each conditional whose condition holds, or its else branch
pub const CONDITIONALS: &str = r#"  // Setup conditional rendering
  Frobo.setupConditionals = function() {
    document.querySelectorAll('[data-condition][id$="-if"]').forEach(ifBlock => {
      const condId = ifBlock.id.slice(0, -'-if'.length);
      const elseIfBlocks = [];
      for (let i = 0; ; i++) {
        const block = document.getElementById(condId + '-elseif-' + i);
        if (!block) break;
        elseIfBlocks.push(block);
      }
      const elseBlock = document.getElementById(condId + '-else');

      const evaluate = () => {
        try {
          let shown = null;
          if (eval(ifBlock.getAttribute('data-condition'))) {
            shown = ifBlock;
          } else {
            for (let j = 0; j < elseIfBlocks.length; j++) {
              if (eval(elseIfBlocks[j].getAttribute('data-condition'))) {
                shown = elseIfBlocks[j];
                break;
              }
            }
          }
          // If no conditions matched, show else block
          if (!shown && elseBlock) shown = elseBlock;
          [ifBlock, ...elseIfBlocks, elseBlock].forEach(block => {
            if (block) block.style.display = block === shown ? 'block' : 'none';
          });
        } catch(e) { console.error('Condition error:', e); }
      };

      evaluate();
      Frobo.conditionals = Frobo.conditionals || [];
      Frobo.conditionals.push(evaluate);
    });
  };

  Frobo.setupConditionals();
"#;

/// Two way binding between inputs and state
pub const INPUT_BINDINGS: &str = r#"  // Setup input and textarea binding
  document.querySelectorAll('input[data-bind], textarea[data-bind]').forEach(input => {
    const stateKey = input.getAttribute('data-bind');
    const path = stateKey.split('.');
    const rootKey = path[0];
    const onChange = input.getAttribute('data-onchange');

    // A nested write does not pass through the proxy, so the root is reassigned to queue it
    const write = (value) => {
      if (path.length === 1) {
        state[rootKey] = value;
        return;
      }
      const parent = Frobo.resolve(path.slice(0, -1).join('.'));
      if (parent == null) return;
      parent[path[path.length - 1]] = value;
      state[rootKey] = state[rootKey];
    };

    // Set initial value
    if (Frobo.resolve(stateKey) !== undefined) {
      input.value = Frobo.resolve(stateKey);
    }

    // Listen for changes
    input.addEventListener('input', (e) => {
      write(e.target.value);
      if (onChange && typeof window[onChange] === 'function') {
        window[onChange](e.target.value);
      }
    });

    // Update input when state changes
    const originalUpdate = Frobo.updateDOM;
    Frobo.updateDOM = function(key) {
      originalUpdate.call(this, key);
      const current = Frobo.resolve(stateKey);
      if (key === rootKey && current !== undefined && input.value !== String(current)) {
        input.value = current;
      }
    };
  });
"#;

/// Fills every loop container with one copy of its template per array element
pub const LOOPS: &str = r#"  // Setup loop rendering
  Frobo.renderLoops = function() {
    document.querySelectorAll('[data-loop]').forEach(container => {
      const arrayName = container.getAttribute('data-loop');
      const template = document.getElementById(container.id + '-template');
      const array = Frobo.resolve(arrayName);

      if (!template || !Array.isArray(array)) return;

      container.innerHTML = '';
      array.forEach((item, index) => {
        const div = document.createElement('div');
        div.appendChild(template.content.cloneNode(true));
        let html = div.innerHTML.split('{{LOOP_INDEX}}').join(String(index));
        html = html.replace(/\{\{LOOP_ITEM(?:\.([\w$.]+))?\}\}/g, (match, field) => {
          const value = field
            ? field.split('.').reduce((v, key) => v == null ? undefined : v[key], item)
            : item;
          return Frobo.escapeHTML(value);
        });
        container.innerHTML += html;
      });
    });
  };

  Frobo.renderLoops();
"#;
